use strum::{AsRefStr, Display, EnumCount, EnumIter, EnumString, IntoEnumIterator};

/// Fixed taxonomy of places.
///
/// The declaration order is the order in which the
/// categories are presented.
#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, AsRefStr, Display, EnumCount, EnumIter, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum CategoryId {
    Senderismo,
    MonumentosNaturales,
    Patrimonio,
    Playas,
    Agenda,
    Gastronomia,
}

impl CategoryId {
    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Senderismo => "senderismo",
            Self::MonumentosNaturales => "monumentos_naturales",
            Self::Patrimonio => "patrimonio",
            Self::Playas => "playas",
            Self::Agenda => "agenda",
            Self::Gastronomia => "gastronomia",
        }
    }

    /// Places of this category are located at the coast.
    pub fn is_coastal(self) -> bool {
        self == Self::Playas
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub title: String,
    pub description: String,
    /// Name of the icon that represents the category.
    pub icon_name: String,
    /// CSS gradient classes.
    pub color: String,
    pub cover_image: String,
}
