//! Skill level scoring over the talent matrix.
//!
//! Levels run `1`..`5`, then `5.1`, then `M` and `W` at the top. Two scales
//! are used: the ordinal mastery score (`5.1` is one step above `5`) and the
//! proficiency value (`5.1` keeps its numeric value).
use crate::extract::talent::{Talent, TalentRecord};
use serde::Serialize;

/// Mastery level labels, lowest first.
pub const MASTERY_LEVELS: [&str; 8] = ["1", "2", "3", "4", "5", "5.1", "M", "W"];

/// Ordinal score of a level token, `0` when the token is not a level.
pub fn mastery_score(token: &str) -> u8 {
    let token = token.trim().to_uppercase();
    MASTERY_LEVELS
        .iter()
        .position(|level| *level == token)
        .map_or(0, |index| index as u8 + 1)
}

/// Numeric proficiency of a level token: `W` is 8, `M` is 7, numbers keep their value.
pub fn proficiency_value(token: &str) -> f64 {
    let token = token.trim();
    if token.eq_ignore_ascii_case("w") {
        return 8.0;
    }
    if token.eq_ignore_ascii_case("m") {
        return 7.0;
    }
    match token.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Staff counts per mastery level for one skill column.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LevelCounts {
    pub skill: String,
    /// One count per entry of [`MASTERY_LEVELS`]
    pub counts: [usize; 8],
}

/// Counts, for every skill column, how many staff hold each mastery level.
pub fn level_distribution(talent: &Talent) -> Vec<LevelCounts> {
    talent
        .skill_names
        .iter()
        .enumerate()
        .map(|(index, skill)| {
            let mut counts = [0usize; 8];
            for record in &talent.records {
                let score = record.skills.get(index).map_or(0, |skill| mastery_score(&skill.level));
                if score > 0 {
                    counts[score as usize - 1] += 1;
                }
            }
            LevelCounts {
                skill: skill.clone(),
                counts,
            }
        })
        .collect()
}

/// A named group of skill columns.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SkillGroup {
    pub name: String,
    pub skills: Vec<String>,
}

impl SkillGroup {
    fn new(name: &str, skills: &[&str]) -> Self {
        SkillGroup {
            name: name.to_owned(),
            skills: skills.iter().map(|skill| (*skill).to_owned()).collect(),
        }
    }
}

/// The skill group table relevant to a role family.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum RoleFocus {
    /// IT and registration work
    It,
    /// Coordination and control
    C,
    /// Terrain, dimensioning and presentation
    Z,
    /// Modeling staff
    Staff,
}

impl RoleFocus {
    /// Picks the focus for a role name, checking IT, then coordinator/head, then support.
    pub fn for_role(role: &str) -> Self {
        let role = role.to_uppercase();
        if role.contains("IT") {
            RoleFocus::It
        } else if role.contains("COORDINATOR") || role.contains("HEAD") {
            RoleFocus::C
        } else if role.contains("SUPPORT") {
            RoleFocus::Z
        } else {
            RoleFocus::Staff
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RoleFocus::It => "IT",
            RoleFocus::C => "C",
            RoleFocus::Z => "Z",
            RoleFocus::Staff => "Staff",
        }
    }

    /// Built-in skill groups for this focus.
    pub fn groups(&self) -> Vec<SkillGroup> {
        match self {
            RoleFocus::It => vec![
                SkillGroup::new("IT", &["IT"]),
                SkillGroup::new("Register", &["Trimble Work", "STATIC X7", "Timms", "Einstellungen Projekt-Info"]),
                SkillGroup::new(
                    "Layout / Partner",
                    &["Worksheet / Layouts / Masterlayouts / Ausschnitt-Set / View-Map"],
                ),
                SkillGroup::new("BIM Cloud", &["BIM Cloud / Teamwork"]),
            ],
            RoleFocus::C => vec![
                SkillGroup::new(
                    "Preparing",
                    &["Story Setting", "Middelling / Repetitionen - Wiederholungen", "Training / Meeting", "AV Daten"],
                ),
                SkillGroup::new("Slanted Obj.", &["Wall / Slab / Column / Beam / Mesh"]),
                SkillGroup::new(
                    "Import- & Export-Übersetzer",
                    &[
                        "2D / Publisher-Set/ PDF/ DWG/DXF Übersetzer",
                        "3D - PLA / IFC / BIMx Übersetzer",
                        "PointCab, LadyBug Übersetzer",
                        "Autodesk Übersetzer .itp/.cat",
                    ],
                ),
                SkillGroup::new("Kontrolle", &["Finishing Cek List / Exporte"]),
                SkillGroup::new("Add-On", &["IFC Viewer", "BIMx", "Rhino", "PointCab Origin [IT]", "PointCab Plugin"]),
                SkillGroup::new(
                    "Bibliotheken / Attribute",
                    &[
                        "Bibliotheken-manager / Zeichnungs-manager / Attribute",
                        "Favoriten",
                        "Migration Up-grade / Migration Down-grade /Template Mergen [Z]",
                        "Layer / Layer-combinations / IFC Klassifizierungen",
                        "Graphic Overrides",
                    ],
                ),
            ],
            RoleFocus::Z => vec![
                SkillGroup::new("3D Terrain", &["Mesh / Library", "Geländemodell / Gebäudemodell [Z]"]),
                SkillGroup::new(
                    "Bemassung",
                    &[
                        "Raster",
                        "Masslinien / Höhenkoten",
                        "Hotlinks / Module",
                        "Beschriftungen/Raumstempel / Auswertungen",
                    ],
                ),
                SkillGroup::new("Additional AC Tools", &["Issue Manager / Colission-Tool / Revision"]),
                SkillGroup::new("Werbung", &["Fotos / Animation"]),
            ],
            RoleFocus::Staff => vec![
                SkillGroup::new("2D", &["DWG"]),
                SkillGroup::new("Decken", &["Slab / Mesh / Beam / Shell / Composite"]),
                SkillGroup::new("Wände", &["Wall / Wall End / Mesh / Column / Composite"]),
                SkillGroup::new("Dach", &["Roof / Mesh / Shell / Column / Beam / Composite / Library"]),
                SkillGroup::new("Türen", &["Door / Opening / Library"]),
                SkillGroup::new("Fenster", &["Window / Skylight / Opening / Shell / Library"]),
                SkillGroup::new("Einrichtung", &["Küche / Sanitär / Technik / Möbel Einbau"]),
                SkillGroup::new("Treppe", &["Stair / Slab / Library"]),
                SkillGroup::new("Geländer", &["Railing / Library"]),
                SkillGroup::new("Stahl", &["Stahlkonstruktion", "Mastskelett"]),
                SkillGroup::new("Leitungen", &["Pipes"]),
                SkillGroup::new("Fassade", &["Complex Profiles / Shell / Morph"]),
                SkillGroup::new("New App", &["Vektor Work", "Revit"]),
            ],
        }
    }
}

/// Mean proficiency of one skill group for one staff member.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GroupAverage {
    pub group: String,
    pub average: f64,
}

/// Averages proficiency per group over the group's skills present in the matrix.
///
/// Groups without any present skill column are omitted.
pub fn group_averages(record: &TalentRecord, groups: &[SkillGroup]) -> Vec<GroupAverage> {
    groups
        .iter()
        .filter_map(|group| {
            let values: Vec<f64> = group
                .skills
                .iter()
                .filter_map(|skill| record.skill(skill))
                .map(proficiency_value)
                .collect();
            if values.is_empty() {
                return None;
            }
            Some(GroupAverage {
                group: group.name.clone(),
                average: values.iter().sum::<f64>() / values.len() as f64,
            })
        })
        .collect()
}

/// A skill held by a staff member, with its mastery score.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScoredSkill {
    pub group: String,
    pub skill: String,
    pub level: String,
    pub score: u8,
}

/// Lists the staff member's held skills (score above zero), group by group.
pub fn mastery_breakdown(record: &TalentRecord, groups: &[SkillGroup]) -> Vec<ScoredSkill> {
    let mut scored = Vec::new();
    for group in groups {
        for skill in &group.skills {
            let Some(level) = record.skill(skill) else {
                continue;
            };
            let score = mastery_score(level);
            if score > 0 {
                scored.push(ScoredSkill {
                    group: group.name.clone(),
                    skill: skill.clone(),
                    level: level.to_owned(),
                    score,
                });
            }
        }
    }
    scored
}

/// Staff count per role, largest first; ties keep first-appearance order.
pub fn role_counts(talent: &Talent) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for record in &talent.records {
        match counts.iter_mut().find(|(role, _)| *role == record.role) {
            Some((_, count)) => *count += 1,
            None => counts.push((record.role.clone(), 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::talent::Skill;

    fn record(name: &str, role: &str, skills: &[(&str, &str)]) -> TalentRecord {
        TalentRecord {
            staff_name: name.to_owned(),
            role: role.to_owned(),
            hire_date: String::new(),
            skills: skills
                .iter()
                .map(|(name, level)| Skill {
                    name: (*name).to_owned(),
                    level: (*level).to_owned(),
                })
                .collect(),
        }
    }

    #[test]
    fn mastery_scale() {
        assert_eq!(mastery_score("1"), 1);
        assert_eq!(mastery_score(" 5 "), 5);
        assert_eq!(mastery_score("5.1"), 6);
        assert_eq!(mastery_score("m"), 7);
        assert_eq!(mastery_score("W"), 8);
        assert_eq!(mastery_score("6"), 0);
        assert_eq!(mastery_score(""), 0);
    }

    #[test]
    fn proficiency_scale() {
        assert_eq!(proficiency_value("W"), 8.0);
        assert_eq!(proficiency_value("m"), 7.0);
        assert_eq!(proficiency_value("5.1"), 5.1);
        assert_eq!(proficiency_value(""), 0.0);
        assert_eq!(proficiency_value("x"), 0.0);
    }

    #[test]
    fn focus_from_role() {
        assert_eq!(RoleFocus::for_role("IT"), RoleFocus::It);
        assert_eq!(RoleFocus::for_role("Head Coordinator"), RoleFocus::C);
        assert_eq!(RoleFocus::for_role("Vice H. Coordinator"), RoleFocus::C);
        assert_eq!(RoleFocus::for_role("Support"), RoleFocus::Z);
        assert_eq!(RoleFocus::for_role("Trainee"), RoleFocus::Staff);
        assert_eq!(RoleFocus::Staff.groups().len(), 13);
    }

    #[test]
    fn averages_skip_absent_groups() {
        let ana = record("Ana", "Staff", &[("DWG", "4"), ("Vektor Work", "W"), ("Revit", "")]);
        let averages = group_averages(&ana, &RoleFocus::Staff.groups());
        assert_eq!(
            averages,
            vec![
                GroupAverage {
                    group: "2D".to_owned(),
                    average: 4.0
                },
                GroupAverage {
                    group: "New App".to_owned(),
                    average: 4.0
                },
            ]
        );
    }

    #[test]
    fn breakdown_keeps_held_skills() {
        let ana = record("Ana", "Staff", &[("DWG", "5.1"), ("Pipes", ""), ("Revit", "M")]);
        let breakdown = mastery_breakdown(&ana, &RoleFocus::Staff.groups());
        let scores: Vec<(&str, u8)> = breakdown.iter().map(|skill| (skill.skill.as_str(), skill.score)).collect();
        assert_eq!(scores, vec![("DWG", 6), ("Revit", 7)]);
    }

    #[test]
    fn distribution_and_roles() {
        let talent = Talent {
            skill_names: vec!["DWG".to_owned(), "Revit".to_owned()],
            records: vec![
                record("Ana", "IT", &[("DWG", "5.1"), ("Revit", "m")]),
                record("Budi", "Staff", &[("DWG", "5.1"), ("Revit", "")]),
                record("Citra", "Staff", &[("DWG", "2"), ("Revit", "M")]),
                record("Dewi", "Trainee", &[("DWG", ""), ("Revit", "")]),
            ],
            ..Talent::default()
        };
        let distribution = level_distribution(&talent);
        assert_eq!(distribution[0].counts, [0, 1, 0, 0, 0, 2, 0, 0]);
        assert_eq!(distribution[1].counts, [0, 0, 0, 0, 0, 0, 2, 0]);
        assert_eq!(
            role_counts(&talent),
            vec![("Staff".to_owned(), 2), ("IT".to_owned(), 1), ("Trainee".to_owned(), 1)]
        );
    }
}
