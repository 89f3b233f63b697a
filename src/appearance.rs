use crate::color::Color;

/// Static, state-independent appearance settings for a component.
///
/// `configure` receives this record and fills in whatever the component wants to override;
/// everything starts out unset. Appearance never carries layout: positions and sizes are
/// the business of constraints.
#[derive(Debug, Clone, PartialEq)]
pub struct Appearance {
    /// Background color.
    pub background: Color,

    /// Static text content, for components that display any.
    pub text: Option<String>,

    /// Label read by assistive technologies.
    pub accessibility_label: Option<String>,

    /// Opacity, where 1 is fully opaque.
    pub opacity: f64,

    /// Whether the component starts out hidden.
    pub hidden: bool,
}

impl Default for Appearance {
    fn default() -> Appearance {
        Appearance {
            background: Color::default(),
            text: None,
            accessibility_label: None,
            opacity: 1.,
            hidden: false,
        }
    }
}
