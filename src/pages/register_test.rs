use super::*;

#[test]
fn verify_otp_path_encodes_address() {
    assert_eq!(verify_otp_path("jamie@uni.edu"), "/verify-otp?email=jamie%40uni.edu");
}

#[test]
fn verify_otp_path_escapes_query_delimiters() {
    assert_eq!(
        verify_otp_path("a+b&c@uni.edu"),
        "/verify-otp?email=a%2Bb%26c%40uni.edu"
    );
    assert_eq!(verify_otp_path("x y#z"), "/verify-otp?email=x%20y%23z");
}

#[test]
fn verify_otp_path_round_trips_through_decoding() {
    let email = "first.last+vote@uni.edu";
    let path = verify_otp_path(email);
    let query = path.trim_start_matches("/verify-otp?email=");
    assert_eq!(urlencoding::decode(query).unwrap(), email);
}
