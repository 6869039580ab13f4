//! Resource model validation: sort fields must be attributes, `name` present, paths unique.

use crate::config::{ResourceDef, NAME_COLUMN};
use crate::error::ConfigError;
use std::collections::HashSet;

pub fn validate(resources: &[&ResourceDef]) -> Result<(), ConfigError> {
    let mut path_segments = HashSet::new();
    for r in resources {
        if r.fields.first() != Some(&NAME_COLUMN) {
            return Err(ConfigError::MissingName(r.path_segment));
        }
        for f in r.sort_fields {
            if !r.has_field(f.as_str()) {
                return Err(ConfigError::UnknownSortField {
                    resource: r.path_segment,
                    field: f.as_str(),
                });
            }
        }
        if !path_segments.insert(r.path_segment) {
            return Err(ConfigError::DuplicatePathSegment(r.path_segment));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ResourceKind, SortField, PEOPLE, RESOURCES};

    #[test]
    fn builtin_model_is_valid() {
        validate(&RESOURCES).unwrap();
    }

    #[test]
    fn sort_field_outside_attributes_is_rejected() {
        static BROKEN: ResourceDef = ResourceDef {
            kind: ResourceKind::People,
            table_name: "people",
            path_segment: "people",
            fields: &["name", "height"],
            sort_fields: &[SortField::Name, SortField::Diameter],
        };
        let err = validate(&[&BROKEN]).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownSortField { field: "diameter", .. }));
    }

    #[test]
    fn duplicate_path_is_rejected() {
        let err = validate(&[&PEOPLE, &PEOPLE]).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicatePathSegment("people")));
    }
}
