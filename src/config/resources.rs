//! Static resource model: one descriptor per table, driving SQL, DDL and request parsing.

use std::fmt;
use std::str::FromStr;

/// Attribute a list request may order by. The union over all resources; each
/// resource accepts its own subset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SortField {
    Name,
    Height,
    Mass,
    HairColor,
    SkinColor,
    EyeColor,
    BirthYear,
    Gender,
    Diameter,
    RotationPeriod,
    OrbitalPeriod,
    Gravity,
    Population,
    Climate,
    Terrain,
    SurfaceWater,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::Height => "height",
            SortField::Mass => "mass",
            SortField::HairColor => "hair_color",
            SortField::SkinColor => "skin_color",
            SortField::EyeColor => "eye_color",
            SortField::BirthYear => "birth_year",
            SortField::Gender => "gender",
            SortField::Diameter => "diameter",
            SortField::RotationPeriod => "rotation_period",
            SortField::OrbitalPeriod => "orbital_period",
            SortField::Gravity => "gravity",
            SortField::Population => "population",
            SortField::Climate => "climate",
            SortField::Terrain => "terrain",
            SortField::SurfaceWater => "surface_water",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "name" => SortField::Name,
            "height" => SortField::Height,
            "mass" => SortField::Mass,
            "hair_color" => SortField::HairColor,
            "skin_color" => SortField::SkinColor,
            "eye_color" => SortField::EyeColor,
            "birth_year" => SortField::BirthYear,
            "gender" => SortField::Gender,
            "diameter" => SortField::Diameter,
            "rotation_period" => SortField::RotationPeriod,
            "orbital_period" => SortField::OrbitalPeriod,
            "gravity" => SortField::Gravity,
            "population" => SortField::Population,
            "climate" => SortField::Climate,
            "terrain" => SortField::Terrain,
            "surface_water" => SortField::SurfaceWater,
            _ => return Err(()),
        })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl FromStr for SortOrder {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(SortOrder::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(SortOrder::Desc)
        } else {
            Err(())
        }
    }
}

/// Which table a descriptor maps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResourceKind {
    People,
    Planets,
}

/// Primary key column shared by every resource.
pub const ID_COLUMN: &str = "id";
/// Set once by the database at insert.
pub const CREATED_AT_COLUMN: &str = "created_at";
/// NULL until the first update, then refreshed by every update.
pub const UPDATED_AT_COLUMN: &str = "updated_at";
/// The one required attribute of every resource.
pub const NAME_COLUMN: &str = "name";

#[derive(Debug)]
pub struct ResourceDef {
    pub kind: ResourceKind,
    pub table_name: &'static str,
    pub path_segment: &'static str,
    /// Text attributes, `name` first. All are searchable.
    pub fields: &'static [&'static str],
    pub sort_fields: &'static [SortField],
}

impl ResourceDef {
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|f| *f == name)
    }

    /// Column to order by, or None when the field is not sortable for this resource.
    pub fn sort_column(&self, field: SortField) -> Option<&'static str> {
        self.sort_fields
            .iter()
            .find(|f| **f == field)
            .map(|f| f.as_str())
    }

    /// Every selected column in table order: id, attributes, timestamps.
    pub fn columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        std::iter::once(ID_COLUMN)
            .chain(self.fields.iter().copied())
            .chain([CREATED_AT_COLUMN, UPDATED_AT_COLUMN])
    }
}

pub static PEOPLE: ResourceDef = ResourceDef {
    kind: ResourceKind::People,
    table_name: "people",
    path_segment: "people",
    fields: &[
        "name",
        "height",
        "mass",
        "hair_color",
        "skin_color",
        "eye_color",
        "birth_year",
        "gender",
    ],
    sort_fields: &[
        SortField::Name,
        SortField::Height,
        SortField::Mass,
        SortField::HairColor,
        SortField::SkinColor,
        SortField::EyeColor,
        SortField::BirthYear,
        SortField::Gender,
    ],
};

pub static PLANETS: ResourceDef = ResourceDef {
    kind: ResourceKind::Planets,
    table_name: "planets",
    path_segment: "planets",
    fields: &[
        "name",
        "diameter",
        "rotation_period",
        "orbital_period",
        "gravity",
        "population",
        "climate",
        "terrain",
        "surface_water",
    ],
    sort_fields: &[
        SortField::Name,
        SortField::Diameter,
        SortField::RotationPeriod,
        SortField::OrbitalPeriod,
        SortField::Gravity,
        SortField::Population,
        SortField::Climate,
        SortField::Terrain,
        SortField::SurfaceWater,
    ],
};

pub static RESOURCES: [&ResourceDef; 2] = [&PEOPLE, &PLANETS];

pub fn resource_by_path(path: &str) -> Option<&'static ResourceDef> {
    RESOURCES.iter().copied().find(|r| r.path_segment == path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_field_parses_every_name() {
        for r in RESOURCES {
            for f in r.sort_fields {
                assert_eq!(f.as_str().parse::<SortField>(), Ok(*f));
            }
        }
        assert!("shoe_size".parse::<SortField>().is_err());
    }

    #[test]
    fn sort_column_is_resource_specific() {
        assert_eq!(PEOPLE.sort_column(SortField::Mass), Some("mass"));
        assert_eq!(PEOPLE.sort_column(SortField::Diameter), None);
        assert_eq!(PLANETS.sort_column(SortField::Diameter), Some("diameter"));
        assert_eq!(PLANETS.sort_column(SortField::HairColor), None);
    }

    #[test]
    fn sort_order_is_case_insensitive() {
        assert_eq!("DESC".parse::<SortOrder>(), Ok(SortOrder::Desc));
        assert_eq!("asc".parse::<SortOrder>(), Ok(SortOrder::Asc));
        assert!("up".parse::<SortOrder>().is_err());
    }

    #[test]
    fn columns_wrap_fields_with_id_and_timestamps() {
        let cols: Vec<_> = PEOPLE.columns().collect();
        assert_eq!(cols.first(), Some(&"id"));
        assert_eq!(cols[1], "name");
        assert_eq!(&cols[cols.len() - 2..], &["created_at", "updated_at"]);
        assert_eq!(cols.len(), PEOPLE.fields.len() + 3);
    }

    #[test]
    fn lookup_by_path() {
        assert_eq!(resource_by_path("planets").map(|r| r.kind), Some(ResourceKind::Planets));
        assert!(resource_by_path("starships").is_none());
    }
}
