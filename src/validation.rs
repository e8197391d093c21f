use crate::birthdate;
use crate::record::ConsultationRequest;
use regex::Regex;

/// A single per-field validation failure, suitable for rendering next to
/// the offending form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: &str) -> Self {
        Self {
            field,
            message: message.to_string(),
        }
    }
}

/// Trim surrounding whitespace and strip angle brackets from user input.
pub fn sanitize(input: &str) -> String {
    input.trim().replace(['<', '>'], "")
}

pub fn is_valid_email(email: &str) -> bool {
    let re = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("invalid email regex");
    re.is_match(email)
}

/// Indian mobile number: 10 digits starting 6-9, after dropping separators.
pub fn is_valid_mobile(mobile: &str) -> bool {
    let digits: String = mobile.chars().filter(|c| c.is_ascii_digit()).collect();
    let re = Regex::new(r"^[6-9]\d{9}$").expect("invalid mobile regex");
    re.is_match(&digits)
}

pub fn is_valid_customer_id(customer_id: &str) -> bool {
    let re = Regex::new(r"^(?i)[A-Z0-9]{4,10}$").expect("invalid customer id regex");
    re.is_match(customer_id)
}

/// Validate a consultation request field by field.
///
/// Collects every failure rather than stopping at the first, so the caller
/// can show the whole list at once.
pub fn validate_consultation(request: &ConsultationRequest) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    if request.name.trim().len() < 2 {
        errors.push(FieldError::new("name", "Name must be at least 2 characters"));
    }

    if !birthdate::validate_format(&request.dob) {
        errors.push(FieldError::new(
            "dob",
            "Invalid date of birth format (MMDDYY)",
        ));
    }

    if request.time.trim().is_empty() {
        errors.push(FieldError::new("time", "Time of birth is required"));
    }

    if request.place.trim().len() < 2 {
        errors.push(FieldError::new("place", "Place of birth is required"));
    }

    if !is_valid_mobile(&request.mobile) {
        errors.push(FieldError::new("mobile", "Invalid mobile number"));
    }

    if !is_valid_email(&request.email) {
        errors.push(FieldError::new("email", "Invalid email address"));
    }

    if request.query.trim().len() < 10 {
        errors.push(FieldError::new(
            "query",
            "Query must be at least 10 characters",
        ));
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> ConsultationRequest {
        ConsultationRequest {
            name: "Asha Rao".into(),
            dob: "021590".into(),
            time: "04:30".into(),
            place: "Pune".into(),
            mobile: "9876543210".into(),
            email: "asha@example.com".into(),
            query: "Guidance on career direction".into(),
        }
    }

    #[test]
    fn sanitize_strips_angle_brackets() {
        assert_eq!(sanitize("  <b>Asha</b>  "), "bAsha/b");
    }

    #[test]
    fn sanitize_leaves_plain_text_alone() {
        assert_eq!(sanitize("Asha Rao"), "Asha Rao");
    }

    #[test]
    fn accepts_basic_emails() {
        assert!(is_valid_email("asha@example.com"));
        assert!(!is_valid_email("asha@example"));
        assert!(!is_valid_email("asha example@x.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn mobile_requires_indian_prefix() {
        assert!(is_valid_mobile("9876543210"));
        assert!(is_valid_mobile("98765-43210"));
        assert!(!is_valid_mobile("1234567890"));
        assert!(!is_valid_mobile("98765"));
    }

    #[test]
    fn customer_id_is_alphanumeric_4_to_10() {
        assert!(is_valid_customer_id("CUST001"));
        assert!(is_valid_customer_id("ab12"));
        assert!(!is_valid_customer_id("abc"));
        assert!(!is_valid_customer_id("CUST-001"));
        assert!(!is_valid_customer_id("ABCDEFGHIJK"));
    }

    #[test]
    fn valid_request_passes() {
        assert!(validate_consultation(&valid_request()).is_ok());
    }

    #[test]
    fn collects_every_field_error() {
        let request = ConsultationRequest {
            name: "A".into(),
            dob: "021".into(),
            time: "".into(),
            place: "P".into(),
            mobile: "12345".into(),
            email: "nope".into(),
            query: "too short".into(),
        };

        let errors = validate_consultation(&request).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();

        assert_eq!(
            fields,
            vec!["name", "dob", "time", "place", "mobile", "email", "query"]
        );
    }

    #[test]
    fn reports_only_the_failing_field() {
        let mut request = valid_request();
        request.email = "not-an-email".into();

        let errors = validate_consultation(&request).unwrap_err();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "email");
    }
}
