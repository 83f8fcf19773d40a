//! Rule selection for a detection result

use crate::anonymization::models::{AnonymizeTemplate, DetectionResult, TransformSpec};

/// Pick the transformation for `result`
///
/// Rules are scanned in declared order and the first rule that is a
/// wildcard or lists the result's field type wins, so a wildcard placed
/// before a specific rule shadows it. With no match the template's default
/// transformation applies; `None` leaves the span untouched.
pub fn select<'t>(
    result: &DetectionResult,
    template: &'t AnonymizeTemplate,
) -> Option<&'t TransformSpec> {
    template
        .field_type_transformations
        .iter()
        .find(|rule| rule.matches(result.field_name()))
        .map(|rule| &rule.transformation)
        .or(template.default_transformation.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anonymization::models::FieldTypeTransformation;

    fn phone() -> DetectionResult {
        DetectionResult::new("PHONE_NUMBER", 0, 5, 1.0)
    }

    #[test]
    fn test_specific_rule() {
        let template = AnonymizeTemplate::new(vec![
            FieldTypeTransformation::for_fields(["EMAIL_ADDRESS"], TransformSpec::Hash),
            FieldTypeTransformation::for_fields(["PHONE_NUMBER"], TransformSpec::Redact),
        ]);
        assert_eq!(select(&phone(), &template), Some(&TransformSpec::Redact));
    }

    #[test]
    fn test_wildcard_first_shadows_specific() {
        let template = AnonymizeTemplate::new(vec![
            FieldTypeTransformation::wildcard(TransformSpec::Hash),
            FieldTypeTransformation::for_fields(["PHONE_NUMBER"], TransformSpec::Redact),
        ]);
        assert_eq!(select(&phone(), &template), Some(&TransformSpec::Hash));
    }

    #[test]
    fn test_first_of_two_matching_rules() {
        let template = AnonymizeTemplate::new(vec![
            FieldTypeTransformation::for_fields(["PHONE_NUMBER"], TransformSpec::replace("a")),
            FieldTypeTransformation::for_fields(["PHONE_NUMBER"], TransformSpec::replace("b")),
        ]);
        assert_eq!(
            select(&phone(), &template),
            Some(&TransformSpec::replace("a"))
        );
    }

    #[test]
    fn test_no_match() {
        let template = AnonymizeTemplate::new(vec![FieldTypeTransformation::for_fields(
            ["CREDIT_CARD"],
            TransformSpec::Redact,
        )]);
        assert_eq!(select(&phone(), &template), None);
    }

    #[test]
    fn test_default_transformation() {
        let template = AnonymizeTemplate::new(vec![FieldTypeTransformation::for_fields(
            ["CREDIT_CARD"],
            TransformSpec::Redact,
        )])
        .with_default(TransformSpec::replace("<PHONE_NUMBER>"));
        assert_eq!(
            select(&phone(), &template),
            Some(&TransformSpec::replace("<PHONE_NUMBER>"))
        );
    }

    #[test]
    fn test_empty_template() {
        assert_eq!(select(&phone(), &AnonymizeTemplate::default()), None);
    }
}
