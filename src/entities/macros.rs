//! Macros for reducing boilerplate when defining entities
//!
//! - [`string_enum!`](crate::string_enum) declares a categorical field type
//!   whose wire form is a fixed lowercase string.
//! - [`impl_record!`](crate::impl_record) implements
//!   [`Record`](crate::core::Record) for an entity struct and declares its
//!   schema from a field table.

/// Declare an enum serialized as fixed strings
///
/// Declaration order is significant: it is the natural ordering used when
/// sorting by the field.
///
/// # Example
/// ```rust,ignore
/// string_enum! {
///     /// Workflow state of a task
///     pub enum TaskStatus {
///         Backlog => "backlog",
///         Todo => "todo",
///         InProgress => "in progress",
///     }
///     default = Todo
/// }
///
/// assert_eq!(TaskStatus::InProgress.as_str(), "in progress");
/// assert_eq!("todo".parse::<TaskStatus>(), Ok(TaskStatus::Todo));
/// ```
#[macro_export]
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $value:literal ),+ $(,)?
        }
        default = $default:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $value)]
                $variant
            ),+
        }

        impl $name {
            /// Every value, in declaration order
            pub const ALL: &'static [$name] = &[$( $name::$variant ),+];

            /// Wire form of the value
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $value ),+
                }
            }

            /// Position in declaration order
            pub fn ordinal(&self) -> usize {
                *self as usize
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| format!("unknown {} '{}'", stringify!($name), s))
            }
        }

        impl From<$name> for $crate::core::field::FieldValue {
            fn from(value: $name) -> Self {
                $crate::core::field::FieldValue::Enum {
                    value: value.as_str(),
                    ordinal: value.ordinal(),
                }
            }
        }
    };
}

/// Implement `Record` for an entity struct
///
/// The struct must have `id: String`, `created_at` and `updated_at`
/// fields. Every listed field must convert into a
/// [`FieldValue`](crate::core::FieldValue).
///
/// # Example
/// ```rust,ignore
/// impl_record!(Task, "task", "tasks", {
///     fields: {
///         "id" => id,
///         "title" => title,
///         "status" => status,
///         "createdAt" => created_at,
///     },
///     searchable: ["title", "id"],
///     enums: ["status"],
///     unique: ["title"],
/// });
/// ```
///
/// `unique` is optional and defaults to no unique fields.
#[macro_export]
macro_rules! impl_record {
    (
        $type:ident, $type_name:literal, $plural:literal, {
            fields: { $( $wire:literal => $field:ident ),+ $(,)? },
            searchable: [ $( $searchable:literal ),* $(,)? ],
            enums: [ $( $enum_field:literal ),* $(,)? ]
            $(, unique: [ $( $unique:literal ),* $(,)? ] )? $(,)?
        }
    ) => {
        impl $crate::core::entity::Record for $type {
            fn schema() -> &'static $crate::core::entity::EntitySchema {
                static SCHEMA: $crate::core::entity::EntitySchema =
                    $crate::core::entity::EntitySchema {
                        entity_type: $type_name,
                        plural: $plural,
                        fields: &[$( $wire ),+],
                        searchable: &[$( $searchable ),*],
                        enum_fields: &[$( $enum_field ),*],
                        unique: &[$( $( $unique ),* )?],
                    };
                &SCHEMA
            }

            fn id(&self) -> &str {
                &self.id
            }

            fn created_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.created_at
            }

            fn updated_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.updated_at
            }

            fn field_value(&self, field: &str) -> Option<$crate::core::field::FieldValue> {
                match field {
                    $( $wire => Some($crate::core::field::FieldValue::from(self.$field.clone())), )+
                    _ => None,
                }
            }

            fn touch(&mut self) {
                self.updated_at = ::chrono::Utc::now();
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::entity::Record;
    use crate::core::field::FieldValue;
    use chrono::{DateTime, Utc};

    crate::string_enum! {
        /// Traffic light colours
        pub enum Light {
            Red => "red",
            Amber => "amber light",
            Green => "green",
        }
        default = Red
    }

    #[derive(Debug, Clone)]
    struct Lamp {
        id: String,
        name: String,
        light: Light,
        note: Option<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    }

    crate::impl_record!(Lamp, "lamp", "lamps", {
        fields: {
            "id" => id,
            "name" => name,
            "light" => light,
            "note" => note,
            "createdAt" => created_at,
        },
        searchable: ["name"],
        enums: ["light"],
        unique: ["name"],
    });

    #[test]
    fn test_string_enum_wire_form() {
        assert_eq!(Light::Amber.as_str(), "amber light");
        assert_eq!(Light::Amber.to_string(), "amber light");
        assert_eq!(serde_json::to_value(Light::Amber).unwrap(), "amber light");
        assert_eq!(
            serde_json::from_value::<Light>(serde_json::json!("green")).unwrap(),
            Light::Green
        );
        assert!(serde_json::from_value::<Light>(serde_json::json!("Green")).is_err());
    }

    #[test]
    fn test_string_enum_order_and_default() {
        assert_eq!(Light::default(), Light::Red);
        assert_eq!(Light::ALL, &[Light::Red, Light::Amber, Light::Green]);
        assert_eq!(Light::Green.ordinal(), 2);
        assert_eq!("red".parse::<Light>(), Ok(Light::Red));
        assert!("blue".parse::<Light>().is_err());
    }

    #[test]
    fn test_impl_record() {
        let now = Utc::now();
        let mut lamp = Lamp {
            id: "l1".to_string(),
            name: "Porch".to_string(),
            light: Light::Amber,
            note: None,
            created_at: now,
            updated_at: now,
        };

        assert_eq!(Lamp::schema().entity_type, "lamp");
        assert_eq!(Lamp::schema().plural, "lamps");
        assert!(Lamp::schema().is_enum("light"));
        assert_eq!(Lamp::schema().unique, &["name"]);
        assert_eq!(lamp.id(), "l1");
        assert_eq!(
            lamp.field_value("light"),
            Some(FieldValue::Enum {
                value: "amber light",
                ordinal: 1
            })
        );
        assert_eq!(lamp.field_value("note"), Some(FieldValue::Null));
        assert_eq!(lamp.field_value("nope"), None);

        lamp.touch();
        assert!(lamp.updated_at() >= now);
        assert_eq!(lamp.created_at(), now);
    }
}
