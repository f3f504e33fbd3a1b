//! Client-side form validation for the auth and nomination pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages call these before invoking the session store or the demo service
//! so the store only ever receives non-empty credentials. Messages are the
//! exact text shown to the user.

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;

use std::fmt;

/// Number of digits in a one-time code.
pub const OTP_LEN: usize = 6;

/// Largest candidate photo accepted by the nomination form.
pub const MAX_PHOTO_BYTES: u64 = 5 * 1024 * 1024;

const MIN_PASSWORD_LEN: usize = 8;
const MIN_STUDENT_ID_LEN: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter both email and password")]
    MissingCredentials,
    #[error("Please fill in all fields")]
    MissingField,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Please use your student email address")]
    NotStudentEmail,
    #[error("Password must be at least 8 characters long")]
    PasswordTooShort,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Please enter a valid student ID")]
    InvalidStudentId,
    #[error("Please enter all 6 digits of the OTP")]
    IncompleteOtp,
    #[error("Please select an image file")]
    NotAnImage,
    #[error("Image must be less than 5MB")]
    ImageTooLarge,
}

/// Trim the email and require both login fields.
///
/// # Errors
///
/// Returns [`ValidationError::MissingCredentials`] if either field is blank.
pub fn validate_login(email: &str, password: &str) -> Result<(String, String), ValidationError> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(ValidationError::MissingCredentials);
    }
    Ok((email.to_owned(), password.to_owned()))
}

/// `local@domain.tld` with no whitespace and exactly one `@`.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Student accounts use an `.edu` address or one mentioning `student`.
pub fn is_student_email(email: &str) -> bool {
    email.ends_with(".edu") || email.contains("student")
}

/// Raw registration form text as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub student_id: String,
    pub password: String,
    pub confirm_password: String,
}

/// Registration that passed every client-side check.
#[derive(Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub student_id: String,
    pub password: String,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("student_id", &self.student_id)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl RegistrationForm {
    /// Check the form in display order; the first failure wins.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] for the first field that fails.
    pub fn validate(&self) -> Result<Registration, ValidationError> {
        let name = self.name.trim();
        let email = self.email.trim();
        let student_id = self.student_id.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingField);
        }
        if !is_valid_email(email) {
            return Err(ValidationError::InvalidEmail);
        }
        if !is_student_email(email) {
            return Err(ValidationError::NotStudentEmail);
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort);
        }
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        if student_id.chars().count() < MIN_STUDENT_ID_LEN {
            return Err(ValidationError::InvalidStudentId);
        }
        Ok(Registration {
            name: name.to_owned(),
            email: email.to_owned(),
            student_id: student_id.to_owned(),
            password: self.password.clone(),
        })
    }
}

/// Six single-digit boxes on the verification page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OtpEntry {
    digits: [Option<char>; OTP_LEN],
}

impl OtpEntry {
    /// Apply typed `input` to box `index`.
    ///
    /// Accepts an empty string (clears the box) or one ASCII digit; anything
    /// else is ignored. Returns the box that should receive focus next.
    pub fn input(&mut self, index: usize, input: &str) -> Option<usize> {
        if index >= OTP_LEN {
            return None;
        }
        let mut chars = input.chars();
        match (chars.next(), chars.next()) {
            (None, _) => {
                self.digits[index] = None;
                None
            }
            (Some(c), None) if c.is_ascii_digit() => {
                self.digits[index] = Some(c);
                (index + 1 < OTP_LEN).then_some(index + 1)
            }
            _ => None,
        }
    }

    /// Backspace on an empty box moves focus to the previous box.
    pub fn backspace_target(&self, index: usize) -> Option<usize> {
        if index == 0 || index >= OTP_LEN || self.digits[index].is_some() {
            return None;
        }
        Some(index - 1)
    }

    pub fn digit(&self, index: usize) -> Option<char> {
        self.digits.get(index).copied().flatten()
    }

    /// Fill every box from `code`, ignoring non-digits and overflow.
    pub fn fill(&mut self, code: &str) {
        self.clear();
        for (slot, c) in self
            .digits
            .iter_mut()
            .zip(code.chars().filter(char::is_ascii_digit))
        {
            *slot = Some(c);
        }
    }

    pub fn clear(&mut self) {
        self.digits = [None; OTP_LEN];
    }

    /// The full code once every box holds a digit.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::IncompleteOtp`] while any box is empty.
    pub fn code(&self) -> Result<String, ValidationError> {
        self.digits
            .iter()
            .map(|d| d.ok_or(ValidationError::IncompleteOtp))
            .collect()
    }
}

/// Check a chosen candidate photo's content type and size.
///
/// # Errors
///
/// Returns [`ValidationError::NotAnImage`] for non-`image/*` types and
/// [`ValidationError::ImageTooLarge`] above [`MAX_PHOTO_BYTES`].
pub fn validate_photo(content_type: &str, size_bytes: u64) -> Result<(), ValidationError> {
    if !content_type.starts_with("image/") {
        return Err(ValidationError::NotAnImage);
    }
    if size_bytes > MAX_PHOTO_BYTES {
        return Err(ValidationError::ImageTooLarge);
    }
    Ok(())
}
