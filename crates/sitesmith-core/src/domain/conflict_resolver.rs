//! Static collision check over a [`FilePlan`].

use std::collections::HashMap;

use crate::domain::{
    entities::file_operation::{FileOperation, FilePlan},
    error::DomainError,
};

/// Proves a plan writes each destination at most once, apart from
/// declared overrides.
///
/// Rules, per destination, in plan order:
/// - the first operation may be of any kind;
/// - exactly one later operation is allowed, and only if it is overridable
///   and neither side is a `mkdir`;
/// - anything else is a [`DomainError::DestinationCollision`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ConflictResolver;

impl ConflictResolver {
    pub fn verify(plan: &FilePlan) -> Result<(), DomainError> {
        let mut seen: HashMap<&str, (&FileOperation, usize)> = HashMap::new();

        for op in plan {
            let key = op.destination.as_str();
            match seen.get_mut(key) {
                None => {
                    seen.insert(key, (op, 1));
                }
                Some((first, count)) => {
                    let allowed =
                        *count == 1 && op.overridable && !op.is_mkdir() && !first.is_mkdir();
                    if !allowed {
                        return Err(DomainError::DestinationCollision {
                            destination: key.to_string(),
                            first: first.to_string(),
                            second: op.to_string(),
                        });
                    }
                    *count += 1;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::file_operation::{SourceId, SourceRef};

    fn copy(dest: &str) -> FileOperation {
        FileOperation::copy(SourceRef::new(SourceId::Bundled, "x"), dest.into())
    }

    #[test]
    fn distinct_destinations_pass() {
        let plan = FilePlan::from_operations(vec![
            FileOperation::mkdir("app".into()),
            copy("app/a"),
            copy("app/b"),
        ]);
        assert!(ConflictResolver::verify(&plan).is_ok());
    }

    #[test]
    fn two_plain_writes_collide() {
        let plan = FilePlan::from_operations(vec![copy("app/a"), copy("app/a")]);
        assert!(matches!(
            ConflictResolver::verify(&plan),
            Err(DomainError::DestinationCollision { destination, .. }) if destination == "app/a"
        ));
    }

    #[test]
    fn one_override_is_allowed() {
        let plan = FilePlan::from_operations(vec![
            FileOperation::write("", "app/_includes/icons.html".into()),
            copy("app/_includes/icons.html").overriding(),
        ]);
        assert!(ConflictResolver::verify(&plan).is_ok());
    }

    #[test]
    fn second_override_collides() {
        let plan = FilePlan::from_operations(vec![
            copy("app/x"),
            copy("app/x").overriding(),
            copy("app/x").overriding(),
        ]);
        assert!(ConflictResolver::verify(&plan).is_err());
    }

    #[test]
    fn mkdir_and_file_on_same_path_collide() {
        let plan = FilePlan::from_operations(vec![
            FileOperation::mkdir("app/css".into()),
            copy("app/css").overriding(),
        ]);
        assert!(ConflictResolver::verify(&plan).is_err());

        let dirs = FilePlan::from_operations(vec![
            FileOperation::mkdir("app/css".into()),
            FileOperation::mkdir("app/css".into()),
        ]);
        assert!(ConflictResolver::verify(&dirs).is_err());
    }
}
