/// The three weighted pillars of the ADI framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pillar {
    Authenticity,
    Differentiation,
    Institutionalization,
}

impl Pillar {
    pub const ALL: [Self; 3] = [
        Self::Authenticity,
        Self::Differentiation,
        Self::Institutionalization,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            Self::Authenticity => "authenticity",
            Self::Differentiation => "differentiation",
            Self::Institutionalization => "institutionalization",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Authenticity => "Authenticity",
            Self::Differentiation => "Differentiation",
            Self::Institutionalization => "Institutionalization",
        }
    }

    /// Ceiling of the pillar's contribution to the 0-100 total.
    pub const fn max_points(self) -> f64 {
        match self {
            Self::Authenticity | Self::Differentiation => 33.0,
            Self::Institutionalization => 34.0,
        }
    }
}
