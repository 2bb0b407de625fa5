//! Newtype IDs for type-safe references to backend records.
//!
//! The operations API identifies records with string IDs (demo fixtures use
//! short prefixed codes such as `inv-001`), so the wrappers hold a `String`
//! rather than a database integer.

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - `new()`, `as_str()` and `Display`
///
/// # Example
///
/// ```rust
/// # use tavola_core::define_id;
/// define_id!(TableId);
/// define_id!(ShiftId);
///
/// let table = TableId::new("t-12");
/// assert_eq!(table.as_str(), "t-12");
///
/// // These are different types, so this won't compile:
/// // let _: TableId = ShiftId::new("s-1");
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }
    };
}

define_id!(ItemId);
define_id!(EmployeeId);
define_id!(PayRunId);
define_id!(ExpenseId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_serialize_transparently() {
        let id = ItemId::new("inv-007");
        assert_eq!(serde_json::to_string(&id).ok().as_deref(), Some("\"inv-007\""));
    }

    #[test]
    fn test_id_display() {
        assert_eq!(EmployeeId::from("emp-3").to_string(), "emp-3");
    }
}
