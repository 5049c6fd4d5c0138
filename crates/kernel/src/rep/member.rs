//! Member ↔ representation converters.
//!
//! Members have no tree position, so there is no child query here.

use tracing::debug;

use crate::models::Member;

use super::{MemberRepresentation, property_map};

/// Map a member to its wire representation.
pub fn to_representation(member: &Member) -> MemberRepresentation {
    MemberRepresentation {
        id: member.id,
        username: member.username.clone(),
        email: member.email.clone(),
        member_type: member.member_type.alias.clone(),
        created: Some(member.created),
        updated: Some(member.updated),
        properties: property_map(&member.member_type.properties, &member.properties),
    }
}

/// Apply an inbound representation to a member in place.
///
/// Username and email follow the payload; id and type do not. Unknown
/// property aliases are skipped without error.
pub fn apply_representation(rep: &MemberRepresentation, member: &mut Member) {
    member.username = rep.username.clone();
    member.email = rep.email.clone();

    for (alias, value) in &rep.properties {
        if member.has_property(alias) {
            member.properties.insert(alias.clone(), value.clone());
        } else {
            debug!(alias = %alias, member = %member.id, "dropping unknown property alias");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use serde_json::Value as JsonValue;

    use crate::models::{MemberType, PropertyKind, PropertyType};

    use super::*;

    fn subscriber_type() -> Arc<MemberType> {
        Arc::new(MemberType {
            alias: "subscriber".to_string(),
            name: "Subscriber".to_string(),
            properties: vec![
                PropertyType::new("display_name", "Display name", PropertyKind::Text),
                PropertyType::new("newsletter", "Newsletter opt-in", PropertyKind::Boolean),
            ],
        })
    }

    #[test]
    fn representation_covers_full_profile_schema() {
        let mut member = Member::new(subscriber_type(), "ada", "ada@example.com");
        member.set_property_value("display_name", serde_json::json!("Ada"));

        let rep = to_representation(&member);

        assert_eq!(rep.username, "ada");
        assert_eq!(rep.member_type, "subscriber");
        assert_eq!(rep.properties.len(), 2);
        assert_eq!(rep.properties["display_name"], serde_json::json!("Ada"));
        assert_eq!(rep.properties["newsletter"], JsonValue::Null);
    }

    #[test]
    fn apply_updates_identity_fields_and_known_properties_only() {
        let mut member = Member::new(subscriber_type(), "ada", "ada@example.com");

        let rep = MemberRepresentation {
            username: "ada.l".to_string(),
            email: "ada@lovelace.dev".to_string(),
            properties: HashMap::from([
                ("newsletter".to_string(), serde_json::json!(true)),
                ("is_admin".to_string(), serde_json::json!(true)),
            ]),
            ..Default::default()
        };

        apply_representation(&rep, &mut member);

        assert_eq!(member.username, "ada.l");
        assert_eq!(member.email, "ada@lovelace.dev");
        assert_eq!(member.property_value("newsletter"), Some(&serde_json::json!(true)));
        assert!(member.property_value("is_admin").is_none());
    }
}
