use crate::{
    helpers::number_helpers::parse_numeric,
    models::addon::{AddonEdit, AddonEditForm},
    Error, Result,
};

pub struct AddonValidator;

impl AddonValidator {
    /// Validates an edited form against the values it was opened with.
    /// Rules, in order: an id is required, something must have changed, and
    /// `value` must be a finite number ≥ 0 (a blank value counts as 0).
    pub fn validate(initial: &AddonEditForm, edited: &AddonEditForm) -> Result<AddonEdit> {
        if edited.id.trim().is_empty() {
            return Err(Error::ValidationError {
                field: "id",
                reason: "INVALID_ADDON_ID",
            });
        }

        if !Self::has_changes(initial, edited) {
            return Err(Error::ValidationError {
                field: "form",
                reason: "NO_CHANGES",
            });
        }

        let value = parse_numeric(&edited.value)
            .filter(|value| *value >= 0.0)
            .ok_or(Error::ValidationError {
                field: "value",
                reason: "VALUE_MUST_BE_NON_NEGATIVE_NUMBER",
            })?;

        Ok(AddonEdit {
            add_on_id: edited.id.trim().to_string(),
            title: edited.title.clone(),
            description: edited.description.clone(),
            value,
            status: edited.status.clone(),
        })
    }

    pub fn has_changes(initial: &AddonEditForm, edited: &AddonEditForm) -> bool {
        initial.title != edited.title
            || initial.description != edited.description
            || initial.value != edited.value
            || initial.status != edited.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn initial() -> AddonEditForm {
        AddonEditForm {
            id: "addon-1".to_string(),
            title: "Extra seats".to_string(),
            description: "Five more seats".to_string(),
            value: "10".to_string(),
            status: "ACTIVE".to_string(),
        }
    }

    #[test]
    fn test_valid_edit() {
        let edited = AddonEditForm {
            value: " 12.5 ".to_string(),
            status: "INACTIVE".to_string(),
            ..initial()
        };

        let edit = AddonValidator::validate(&initial(), &edited).unwrap();
        assert_eq!(edit.add_on_id, "addon-1");
        assert_eq!(edit.value, 12.5);
        assert_eq!(edit.status, "INACTIVE");
    }

    #[test]
    fn test_missing_id() {
        let edited = AddonEditForm {
            id: String::new(),
            title: "New".to_string(),
            ..initial()
        };

        assert_eq!(
            AddonValidator::validate(&initial(), &edited).unwrap_err(),
            Error::ValidationError {
                field: "id",
                reason: "INVALID_ADDON_ID"
            }
        );
    }

    #[test]
    fn test_unchanged_form_is_rejected() {
        assert_eq!(
            AddonValidator::validate(&initial(), &initial()).unwrap_err(),
            Error::ValidationError {
                field: "form",
                reason: "NO_CHANGES"
            }
        );
    }

    #[test]
    fn test_bad_values() {
        for value in ["-1", "-0.5", "abc", "inf", "NaN"] {
            let edited = AddonEditForm {
                value: value.to_string(),
                ..initial()
            };
            assert_eq!(
                AddonValidator::validate(&initial(), &edited).unwrap_err(),
                Error::ValidationError {
                    field: "value",
                    reason: "VALUE_MUST_BE_NON_NEGATIVE_NUMBER"
                },
                "value: {value:?}"
            );
        }
    }

    #[test]
    fn test_blank_value_counts_as_zero() {
        for value in ["", "   "] {
            let edited = AddonEditForm {
                title: "Extra desks".to_string(),
                value: value.to_string(),
                ..initial()
            };
            let edit = AddonValidator::validate(&initial(), &edited).unwrap();
            assert_eq!(edit.value, 0.0, "value: {value:?}");
        }
    }

    #[test]
    fn test_unknown_status_is_sent_back_unchanged() {
        let opened = AddonEditForm {
            status: "ARCHIVED".to_string(),
            ..initial()
        };
        let edited = AddonEditForm {
            title: "Extra desks".to_string(),
            ..opened.clone()
        };

        let edit = AddonValidator::validate(&opened, &edited).unwrap();
        let body = serde_json::to_value(&edit).unwrap();
        assert_eq!(body["status"], "ARCHIVED");
        assert_eq!(body["title"], "Extra desks");
    }
}
