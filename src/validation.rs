use chrono::NaiveDate;

use crate::error::{ExpungementError, Result};
use crate::models::{Answer, EligibilityForm, EligibilityRequest, OffenseType};

pub const MIN_AGE: u8 = 10;
pub const MAX_AGE: u8 = 100;

/// Enforces the questionnaire's widget constraints on a posted form.
///
/// Free-text fields are passed through untouched, blanks included. Only the
/// constraints a browser widget would enforce are checked here: the numeric
/// age range, a real calendar date, and the fixed choice lists.
#[derive(Debug, Clone, Default)]
pub struct InputValidator;

impl InputValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn to_request(&self, form: EligibilityForm) -> Result<EligibilityRequest> {
        let age = self.validate_age(&form.age)?;
        let sentence_completed = self.validate_date(&form.sentence_completed)?;

        let offense_type = OffenseType::from_form(form.offense_type.trim()).ok_or_else(|| {
            ExpungementError::Validation(format!(
                "Offense type must be Misdemeanor or Felony, got '{}'",
                form.offense_type
            ))
        })?;
        let convicted = Self::answer("Convicted", &form.convicted)?;
        let first_offense = Self::answer("First offense", &form.first_offense)?;

        Ok(EligibilityRequest {
            charge: form.charge,
            offense_type,
            convicted,
            sentence_completed,
            first_offense,
            county: form.county,
            age,
        })
    }

    pub fn validate_age(&self, raw: &str) -> Result<u8> {
        let age: i64 = raw.trim().parse().map_err(|_| {
            ExpungementError::Validation(format!("Age must be a whole number, got '{raw}'"))
        })?;

        if !(i64::from(MIN_AGE)..=i64::from(MAX_AGE)).contains(&age) {
            return Err(ExpungementError::Validation(format!(
                "Age must be between {MIN_AGE} and {MAX_AGE}, got {age}"
            )));
        }

        Ok(age as u8)
    }

    pub fn validate_date(&self, raw: &str) -> Result<NaiveDate> {
        NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
            ExpungementError::Validation(format!(
                "Date sentence completed must be a calendar date (YYYY-MM-DD), got '{raw}'"
            ))
        })
    }

    fn answer(label: &str, raw: &str) -> Result<Answer> {
        Answer::from_form(raw.trim()).ok_or_else(|| {
            ExpungementError::Validation(format!("{label} must be Yes or No, got '{raw}'"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> EligibilityForm {
        EligibilityForm {
            charge: "Shoplifting".to_string(),
            offense_type: "Misdemeanor".to_string(),
            convicted: "Yes".to_string(),
            sentence_completed: "2018-05-01".to_string(),
            first_offense: "Yes".to_string(),
            county: "Hinds".to_string(),
            age: "22".to_string(),
        }
    }

    #[test]
    fn test_valid_form_builds_request() {
        let req = InputValidator::new().to_request(form()).unwrap();
        assert_eq!(req.charge, "Shoplifting");
        assert_eq!(req.offense_type, OffenseType::Misdemeanor);
        assert_eq!(req.convicted, Answer::Yes);
        assert_eq!(
            req.sentence_completed,
            NaiveDate::from_ymd_opt(2018, 5, 1).unwrap()
        );
        assert_eq!(req.first_offense, Answer::Yes);
        assert_eq!(req.county, "Hinds");
        assert_eq!(req.age, 22);
    }

    #[test]
    fn test_age_bounds() {
        let v = InputValidator::new();
        assert_eq!(v.validate_age("10").unwrap(), 10);
        assert_eq!(v.validate_age("100").unwrap(), 100);
        assert!(v.validate_age("9").is_err());
        assert!(v.validate_age("101").is_err());
        assert!(v.validate_age("-5").is_err());
        assert!(v.validate_age("twenty").is_err());
        assert!(v.validate_age("").is_err());
    }

    #[test]
    fn test_age_nine_rejects_whole_submission() {
        let mut f = form();
        f.age = "9".to_string();
        let err = InputValidator::new().to_request(f).unwrap_err();
        assert!(matches!(err, ExpungementError::Validation(_)));
    }

    #[test]
    fn test_invalid_calendar_date() {
        let v = InputValidator::new();
        assert!(v.validate_date("2019-02-29").is_err());
        assert!(v.validate_date("05/01/2018").is_err());
        assert!(v.validate_date("2020-02-29").is_ok());
    }

    #[test]
    fn test_blank_free_text_passes_through() {
        let mut f = form();
        f.charge = String::new();
        f.county = String::new();
        let req = InputValidator::new().to_request(f).unwrap();
        assert_eq!(req.charge, "");
        assert_eq!(req.county, "");
    }

    #[test]
    fn test_unknown_choice_values() {
        let mut f = form();
        f.offense_type = "Infraction".to_string();
        assert!(InputValidator::new().to_request(f).is_err());

        let mut f = form();
        f.convicted = "Maybe".to_string();
        assert!(InputValidator::new().to_request(f).is_err());
    }
}
