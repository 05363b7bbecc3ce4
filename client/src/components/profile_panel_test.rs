use super::*;

#[test]
fn short_password_is_rejected() {
    assert_eq!(check_password("abc", "abc"), Err("password must be at least 6 characters"));
}

#[test]
fn mismatched_confirmation_is_rejected() {
    assert_eq!(check_password("hunter22", "hunter23"), Err("passwords do not match"));
}

#[test]
fn matching_password_passes() {
    assert_eq!(check_password("hunter22", "hunter22"), Ok(()));
}
