/// Tri-state update for an optional goal field.
///
/// Goal edits only send the fields that changed, and an optional field such
/// as the description can be left alone, replaced, or removed.
///
/// ```
/// use goalboard_domain::FieldUpdate;
///
/// let mut description = Some("after lunch".to_string());
/// FieldUpdate::Set("after dinner".to_string()).apply_to(&mut description);
/// assert_eq!(description.as_deref(), Some("after dinner"));
///
/// FieldUpdate::<String>::Clear.apply_to(&mut description);
/// assert_eq!(description, None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    #[default]
    NoChange,
    Set(T),
    Clear,
}

impl<T> FieldUpdate<T> {
    pub fn apply_to(self, field: &mut Option<T>) {
        match self {
            FieldUpdate::NoChange => {}
            FieldUpdate::Set(value) => *field = Some(value),
            FieldUpdate::Clear => *field = None,
        }
    }

    pub fn is_change(&self) -> bool {
        !matches!(self, FieldUpdate::NoChange)
    }
}

impl<T: PartialEq> FieldUpdate<T> {
    /// The update turning `current` into `desired`, or `NoChange` when they match.
    pub fn between(current: &Option<T>, desired: Option<T>) -> Self {
        if *current == desired {
            return FieldUpdate::NoChange;
        }
        match desired {
            Some(value) => FieldUpdate::Set(value),
            None => FieldUpdate::Clear,
        }
    }
}
