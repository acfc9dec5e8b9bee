//! Sensitive data masking for logs.
//!
//! Masks secret keys, session tokens and request signatures so that signed
//! requests can be logged for debugging without leaking credentials.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// Patterns for detecting sensitive data.
static PATTERNS: LazyLock<Vec<SensitivePattern>> = LazyLock::new(|| {
    vec![
        // Secret keys in config files, JSON or key=value pairs
        SensitivePattern {
            regex: Regex::new(
                r#"(?i)(secret[_-]?key|secretkey)["\s:=]+["']?([A-Za-z0-9+/=_-]{8,128})["']?"#,
            )
            .expect("valid secret key pattern"),
            group: 2,
        },
        // Session tokens (legacy `Token=` parameter, `X-TC-Token` header)
        SensitivePattern {
            regex: Regex::new(r#"(?i)(x-tc-token|session[_-]?token|\btoken)["\s:=]+["']?([A-Za-z0-9+/=_.-]{8,})["']?"#)
                .expect("valid token pattern"),
            group: 2,
        },
        // TC3 Authorization header signature (hex) and legacy Signature parameter (base64)
        SensitivePattern {
            regex: Regex::new(r#"(?i)signature["\s:=]+["']?([A-Za-z0-9+/%]{16,}={0,2})"#)
                .expect("valid signature pattern"),
            group: 1,
        },
    ]
});

struct SensitivePattern {
    regex: Regex,
    group: usize,
}

/// Masks sensitive data in strings.
#[derive(Debug, Clone)]
pub struct SensitiveDataMasker {
    /// Minimum length of string to partially reveal
    min_length: usize,
    /// Characters to show at start of masked value
    show_start: usize,
    /// Characters to show at end of masked value
    show_end: usize,
    /// Mask character
    mask_char: char,
}

impl Default for SensitiveDataMasker {
    fn default() -> Self {
        Self::new()
    }
}

impl SensitiveDataMasker {
    /// Create a new masker with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            min_length: 8,
            show_start: 3,
            show_end: 3,
            mask_char: '*',
        }
    }

    /// Create a masker with custom settings.
    #[must_use]
    pub fn with_settings(min_length: usize, show_start: usize, show_end: usize) -> Self {
        Self {
            min_length,
            show_start,
            show_end,
            mask_char: '*',
        }
    }

    /// Mask a known sensitive value.
    ///
    /// ```
    /// use hiface_telemetry::masking::SensitiveDataMasker;
    ///
    /// let masker = SensitiveDataMasker::new();
    /// let masked = masker.mask_value("Gu5t9xGARNpq86cd98joQYCN3EXAMPLE");
    /// assert_eq!(masked, "Gu5***PLE");
    /// ```
    #[must_use]
    pub fn mask_value(&self, value: &str) -> String {
        let chars: Vec<char> = value.chars().collect();
        if chars.len() < self.min_length {
            return self.mask_char.to_string().repeat(chars.len().max(3));
        }

        let start: String = chars[..self.show_start.min(chars.len())].iter().collect();
        let end: String = if chars.len() > self.show_end {
            chars[chars.len() - self.show_end..].iter().collect()
        } else {
            String::new()
        };

        format!("{start}{}{end}", self.mask_char.to_string().repeat(3))
    }

    /// Mask sensitive data in a string using pattern detection.
    ///
    /// ```
    /// use hiface_telemetry::masking::SensitiveDataMasker;
    ///
    /// let masker = SensitiveDataMasker::new();
    /// let masked = masker.mask_string(r#"{"secret_key": "Gu5t9xGARNpq86cd98joQYCN3EXAMPLE"}"#);
    /// assert!(!masked.contains("Gu5t9xGARNpq86cd98joQYCN3EXAMPLE"));
    /// ```
    #[must_use]
    pub fn mask_string<'a>(&self, input: &'a str) -> Cow<'a, str> {
        let mut result = input.to_string();
        let mut modified = false;

        for pattern in PATTERNS.iter() {
            let secrets: Vec<String> = pattern
                .regex
                .captures_iter(&result)
                .filter_map(|captures| captures.get(pattern.group))
                .map(|m| m.as_str().to_string())
                .collect();
            for secret in secrets {
                let masked = self.mask_value(&secret);
                result = result.replace(&secret, &masked);
                modified = true;
            }
        }

        if modified {
            Cow::Owned(result)
        } else {
            Cow::Borrowed(input)
        }
    }

    /// Check if a string contains sensitive patterns.
    #[must_use]
    pub fn contains_sensitive(&self, input: &str) -> bool {
        PATTERNS.iter().any(|p| p.regex.is_match(input))
    }
}

/// A wrapper type for sensitive values that masks them in Display/Debug.
#[derive(Clone)]
pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
    /// Wrap a value as sensitive.
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Get the inner value (use with caution).
    pub fn expose(&self) -> &T {
        &self.0
    }

    /// Consume and return the inner value.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> std::fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl<T> std::fmt::Display for Sensitive<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl<T: serde::Serialize> serde::Serialize for Sensitive<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str("[REDACTED]")
    }
}
