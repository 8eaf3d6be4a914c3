/// Password complexity policy.
///
/// A password is acceptable when every rule holds: at least eight
/// characters, at least one ASCII uppercase letter, one ASCII lowercase
/// letter, one digit, and one character from the fixed special set.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordPolicy;

impl PasswordPolicy {
    const MIN_LENGTH: usize = 8;
    const SPECIAL_CHARS: &'static [char] = &['#', '?', '!', '@', '$', '%', '^', '&', '*', '-'];

    pub fn new() -> Self {
        Self
    }

    /// Check a password against the complexity rule.
    ///
    /// Pure and deterministic; no side effects.
    pub fn is_acceptable(&self, password: &str) -> bool {
        password.chars().count() >= Self::MIN_LENGTH
            && password.chars().any(|c| c.is_ascii_uppercase())
            && password.chars().any(|c| c.is_ascii_lowercase())
            && password.chars().any(|c| c.is_ascii_digit())
            && password.chars().any(|c| Self::SPECIAL_CHARS.contains(&c))
    }

    /// The rules a password must satisfy, in the wording returned to clients.
    pub fn requirements(&self) -> &'static str {
        "1. Has minimum 8 characters in length. \
         2. At least one uppercase English letter. \
         3. At least one lowercase English letter. \
         4. At least one digit. \
         5. At least one special character."
    }
}
