//! Password generator and strength meter.

use rand::Rng;
use serde::Serialize;

const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";
const SPECIAL: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Highest score `check_strength` can return.
pub const MAX_SCORE: u8 = 7;

/// Which character classes a generated password draws from.
#[derive(Debug, Clone, Copy)]
pub struct PasswordPolicy {
    pub length: usize,
    pub uppercase: bool,
    pub lowercase: bool,
    pub numbers: bool,
    pub special: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            length: 16,
            uppercase: true,
            lowercase: true,
            numbers: true,
            special: true,
        }
    }
}

/// Generate a random password.
///
/// With every class disabled, letters and digits are used instead.
pub fn generate_password(policy: &PasswordPolicy) -> String {
    let mut alphabet = String::new();
    if policy.lowercase {
        alphabet.push_str(LOWERCASE);
    }
    if policy.uppercase {
        alphabet.push_str(UPPERCASE);
    }
    if policy.numbers {
        alphabet.push_str(DIGITS);
    }
    if policy.special {
        alphabet.push_str(SPECIAL);
    }
    if alphabet.is_empty() {
        alphabet = format!("{LOWERCASE}{UPPERCASE}{DIGITS}");
    }

    let chars: Vec<char> = alphabet.chars().collect();
    let mut rng = rand::rng();
    (0..policy.length)
        .map(|_| chars[rng.random_range(0..chars.len())])
        .collect()
}

/// Strength label, ordered weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Strength {
    VeryWeak,
    Weak,
    Fair,
    Good,
    Strong,
    VeryStrong,
    Excellent,
}

impl Strength {
    fn from_score(score: u8) -> Self {
        match score {
            0 => Self::VeryWeak,
            1 => Self::Weak,
            2 => Self::Fair,
            3 => Self::Good,
            4 => Self::Strong,
            5 => Self::VeryStrong,
            _ => Self::Excellent,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::VeryWeak => "Very weak",
            Self::Weak => "Weak",
            Self::Fair => "Fair",
            Self::Good => "Good",
            Self::Strong => "Strong",
            Self::VeryStrong => "Very strong",
            Self::Excellent => "Excellent",
        }
    }
}

/// Result of `check_strength`.
#[derive(Debug, Clone, Serialize)]
pub struct StrengthReport {
    pub score: u8,
    pub max_score: u8,
    pub strength: Strength,
    pub feedback: Vec<String>,
    pub percentage: u8,
}

/// Score a password from 0 to 7.
pub fn check_strength(password: &str) -> StrengthReport {
    let len = password.chars().count();
    let mut score = 0u8;
    let mut feedback = Vec::new();

    if len >= 8 {
        score += 1;
    } else {
        feedback.push("Use at least 8 characters".to_string());
    }
    if len >= 12 {
        score += 1;
    }

    let checks: [(fn(&char) -> bool, &str); 4] = [
        (char::is_ascii_lowercase, "Add lowercase letters"),
        (char::is_ascii_uppercase, "Add uppercase letters"),
        (char::is_ascii_digit, "Add numbers"),
        (|c: &char| SPECIAL.contains(*c), "Add special characters"),
    ];
    for (present, hint) in checks {
        if password.chars().any(|c| present(&c)) {
            score += 1;
        } else {
            feedback.push(hint.to_string());
        }
    }

    if len >= 16 {
        score += 1;
    }

    StrengthReport {
        score,
        max_score: MAX_SCORE,
        strength: Strength::from_score(score),
        feedback,
        percentage: (u32::from(score) * 100 / u32::from(MAX_SCORE)) as u8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_password_respects_length_and_classes() {
        let policy = PasswordPolicy {
            length: 40,
            uppercase: false,
            lowercase: false,
            numbers: true,
            special: false,
        };
        let pw = generate_password(&policy);
        assert_eq!(pw.len(), 40);
        assert!(pw.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn no_classes_falls_back_to_alphanumerics() {
        let policy = PasswordPolicy {
            length: 64,
            uppercase: false,
            lowercase: false,
            numbers: false,
            special: false,
        };
        let pw = generate_password(&policy);
        assert!(pw.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn empty_password_scores_zero() {
        let report = check_strength("");
        assert_eq!(report.score, 0);
        assert_eq!(report.strength, Strength::VeryWeak);
        assert_eq!(report.feedback.len(), 5);
        assert_eq!(report.percentage, 0);
    }

    #[test]
    fn long_mixed_password_is_excellent() {
        let report = check_strength("Abcdefgh1234!@#$xyz");
        assert_eq!(report.score, MAX_SCORE);
        assert_eq!(report.strength, Strength::Excellent);
        assert!(report.feedback.is_empty());
        assert_eq!(report.percentage, 100);
    }

    #[test]
    fn short_lowercase_password_gets_hints() {
        let report = check_strength("abc");
        assert_eq!(report.score, 1);
        assert_eq!(report.strength.label(), "Weak");
        assert!(report.feedback.iter().any(|f| f.contains("numbers")));
    }
}
