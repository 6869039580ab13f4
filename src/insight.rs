//! Canned "AI insight" text: a random template filled with an entity's attributes.

use crate::config::ResourceKind;
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use serde_json::Value;

pub const MODEL_VERSION: &str = "v1.0";
/// Score reported when the named entity is not in the database.
pub const UNKNOWN_CONFIDENCE: f64 = 0.3;
pub const MIN_CONFIDENCE: f64 = 0.75;
pub const MAX_CONFIDENCE: f64 = 0.98;

#[derive(Clone, Debug, Serialize)]
pub struct Insight {
    pub name: String,
    pub entity_type: &'static str,
    pub insight: String,
    pub confidence_score: f64,
    pub generated_at: DateTime<Utc>,
    pub model_version: &'static str,
}

type Template = fn(&Attrs<'_>) -> String;

/// Attribute accessor over a decoded row; null or missing renders as `unknown`.
struct Attrs<'a>(&'a Value);

impl Attrs<'_> {
    fn get(&self, key: &str) -> &str {
        self.0.get(key).and_then(Value::as_str).unwrap_or("unknown")
    }
}

fn people_profile(a: &Attrs<'_>) -> String {
    format!(
        "Profile analysis of {} points to a striking individual. Standing {}cm tall and weighing {}kg, \
         they carry an unusual build. {} hair and {} eyes hint at a notable lineage, and as a {} born in {} \
         they make a compelling demographic case.",
        a.get("name"), a.get("height"), a.get("mass"), a.get("hair_color"), a.get("eye_color"),
        a.get("gender"), a.get("birth_year")
    )
}

fn people_pattern(a: &Attrs<'_>) -> String {
    format!(
        "Pattern matching flags {} as a subject of real interest. The biometrics ({}cm, {}kg) sit in an \
         uncommon percentile, while {} hair paired with {} eyes forms a distinctive appearance. Being {} and \
         born in {}, they reflect the era they come from.",
        a.get("name"), a.get("height"), a.get("mass"), a.get("hair_color"), a.get("eye_color"),
        a.get("gender"), a.get("birth_year")
    )
}

fn people_phenotype(a: &Attrs<'_>) -> String {
    format!(
        "The model reads {} as an exceptional being. At {}cm and {}kg their physical profile stands out; \
         {} hair, {} skin and {} eyes complete a memorable phenotype. Records list them as {}, born {}.",
        a.get("name"), a.get("height"), a.get("mass"), a.get("hair_color"), a.get("skin_color"),
        a.get("eye_color"), a.get("gender"), a.get("birth_year")
    )
}

fn people_archive(a: &Attrs<'_>) -> String {
    format!(
        "Cross-referencing archives, {} emerges as a valuable data point. Height {}cm, mass {}kg, {} hair and \
         {} eyes: a combination rarely seen together. Their {} identity and {} birth year round out the picture.",
        a.get("name"), a.get("height"), a.get("mass"), a.get("hair_color"), a.get("eye_color"),
        a.get("gender"), a.get("birth_year")
    )
}

const PEOPLE_TEMPLATES: &[Template] = &[people_profile, people_pattern, people_phenotype, people_archive];

fn planet_survey(a: &Attrs<'_>) -> String {
    format!(
        "Planetary survey of {} reveals a world of real complexity. A {}km diameter and a population of {} \
         make it significant, while its {} climate over {} terrain shapes a unique environment. Gravity of {} \
         and a {} hour day suggest interesting orbital dynamics.",
        a.get("name"), a.get("diameter"), a.get("population"), a.get("climate"), a.get("terrain"),
        a.get("gravity"), a.get("rotation_period")
    )
}

fn planet_orbit(a: &Attrs<'_>) -> String {
    format!(
        "Orbital modeling places {} among notable celestial bodies. {}km across with {} inhabitants, it pairs \
         a {} climate with {} landscapes. Its {} gravity and {} day orbit around its star complete the profile.",
        a.get("name"), a.get("diameter"), a.get("population"), a.get("climate"), a.get("terrain"),
        a.get("gravity"), a.get("orbital_period")
    )
}

fn planet_ecology(a: &Attrs<'_>) -> String {
    format!(
        "The model rates {} as a world of high scientific value. With {} residents on a {}km sphere, its {} \
         weather and {} features point to diverse ecological niches; surface water covers {} percent.",
        a.get("name"), a.get("population"), a.get("diameter"), a.get("climate"), a.get("terrain"),
        a.get("surface_water")
    )
}

fn planet_records(a: &Attrs<'_>) -> String {
    format!(
        "Astronomical records show {} rotating every {} hours and orbiting every {} days. {} gravity, a {} \
         climate and {} terrain make it an important system for {} inhabitants.",
        a.get("name"), a.get("rotation_period"), a.get("orbital_period"), a.get("gravity"),
        a.get("climate"), a.get("terrain"), a.get("population")
    )
}

const PLANET_TEMPLATES: &[Template] = &[planet_survey, planet_orbit, planet_ecology, planet_records];

pub fn entity_type_name(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::People => "people",
        ResourceKind::Planets => "planets",
    }
}

/// Insight for a stored entity: random template, confidence in [0.75, 0.98] at two decimals.
pub fn generate<R: Rng>(kind: ResourceKind, entity: &Value, rng: &mut R) -> Insight {
    let templates = match kind {
        ResourceKind::People => PEOPLE_TEMPLATES,
        ResourceKind::Planets => PLANET_TEMPLATES,
    };
    let attrs = Attrs(entity);
    let text = templates
        .choose(rng)
        .map(|t| t(&attrs))
        .unwrap_or_default();
    let raw: f64 = rng.gen_range(MIN_CONFIDENCE..=MAX_CONFIDENCE);
    Insight {
        name: attrs.get("name").to_string(),
        entity_type: entity_type_name(kind),
        insight: text,
        confidence_score: (raw * 100.0).round() / 100.0,
        generated_at: Utc::now(),
        model_version: MODEL_VERSION,
    }
}

/// Insight for a name with no matching entity.
pub fn generate_unknown(kind: ResourceKind, name: &str) -> Insight {
    let text = match kind {
        ResourceKind::People => format!(
            "{} does not appear in our records yet. Going by the name alone, this individual likely has \
             traits that would reward further study.",
            name
        ),
        ResourceKind::Planets => format!(
            "{} is not a catalogued world. The name hints at a celestial body whose astronomical properties \
             deserve a closer look.",
            name
        ),
    };
    Insight {
        name: name.to_string(),
        entity_type: entity_type_name(kind),
        insight: text,
        confidence_score: UNKNOWN_CONFIDENCE,
        generated_at: Utc::now(),
        model_version: MODEL_VERSION,
    }
}
