use super::*;

#[test]
fn display_label_prefers_display_name() {
    let p = Profile {
        display_name: Some("Ada Lovelace".into()),
        email: Some("ada@example.com".into()),
        ..Profile::default()
    };
    assert_eq!(p.display_label(), "Ada Lovelace");
    assert_eq!(p.initials(), "AL");
}

#[test]
fn display_label_falls_back_to_email_local_part() {
    let p = Profile { display_name: Some("  ".into()), email: Some("grace.hopper@example.com".into()), ..Profile::default() };
    assert_eq!(p.display_label(), "grace.hopper");
    assert_eq!(p.initials(), "GH");
}

#[test]
fn display_label_anonymous_without_name_or_email() {
    assert_eq!(Profile::default().display_label(), "Anonymous");
}

#[test]
fn update_validate_trims_and_blanks_to_none() {
    let u = ProfileUpdate { display_name: Some("  Ada ".into()), bio: Some("   ".into()) }
        .validate()
        .unwrap();
    assert_eq!(u.display_name.as_deref(), Some("Ada"));
    assert_eq!(u.bio, None);
}

#[test]
fn update_validate_rejects_long_fields() {
    let long_name = ProfileUpdate { display_name: Some("n".repeat(MAX_DISPLAY_NAME_CHARS + 1)), bio: None };
    assert_eq!(
        long_name.validate().unwrap_err(),
        RecordError::DisplayNameTooLong { max: MAX_DISPLAY_NAME_CHARS }
    );

    let long_bio = ProfileUpdate { display_name: None, bio: Some("b".repeat(MAX_BIO_CHARS + 1)) };
    assert_eq!(long_bio.validate().unwrap_err(), RecordError::BioTooLong { max: MAX_BIO_CHARS });
}

#[test]
fn avatar_accepts_known_image_types() {
    let png = AvatarUpload::validate("image/png", 10).unwrap();
    assert_eq!(png.object_path("u1"), "u1/avatar.png");

    let jpeg = AvatarUpload::validate("Image/JPEG; charset=binary", 10).unwrap();
    assert_eq!(jpeg.content_type, "image/jpeg");
    assert_eq!(jpeg.extension, "jpg");
}

#[test]
fn avatar_rejects_other_types_and_oversize() {
    assert_eq!(
        AvatarUpload::validate("application/pdf", 10).unwrap_err(),
        RecordError::UnsupportedAvatarType("application/pdf".into())
    );
    assert_eq!(
        AvatarUpload::validate("image/png", MAX_AVATAR_BYTES + 1).unwrap_err(),
        RecordError::AvatarTooLarge { max_bytes: MAX_AVATAR_BYTES }
    );
}

#[test]
fn email_label_matches_profile_fallback() {
    assert_eq!(email_label(Some("ace@example.com")), "ace");
    assert_eq!(email_label(Some("@example.com")), "Anonymous");
    assert_eq!(email_label(None), Profile::default().display_label());
}
