//! Document Root Port - presentation-level markers.
//!
//! The shell applies the theme by setting or clearing a marker here. Screens
//! read markers to decide how to present themselves.

pub trait DocumentRoot: Send + Sync {
    /// Add (`present == true`) or remove a marker. Setting the current value is a no-op.
    fn set_marker(&self, marker: &str, present: bool);

    fn has_marker(&self, marker: &str) -> bool;
}
