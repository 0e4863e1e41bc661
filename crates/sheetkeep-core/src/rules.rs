//! Pure sheet arithmetic
//!
//! Integer floor division throughout: a score of 9 gives -1, a score of 7
//! gives -2.

use crate::model::{Ability, AbilityScores, ProficiencyLevel, SavingThrows, SkillDetail};

/// `floor((score - 10) / 2) + proficiency_bonus * level`
pub fn modifier(score: i64, level: ProficiencyLevel, proficiency_bonus: i64) -> i64 {
    (score - 10).div_euclid(2) + proficiency_bonus * level.ordinal()
}

/// Plain ability modifier with no proficiency applied
pub fn ability_modifier(score: i64) -> i64 {
    modifier(score, ProficiencyLevel::None, 0)
}

/// Total bonus for a skill check, including the row's custom modifier
pub fn skill_modifier(scores: &AbilityScores, skill: &SkillDetail, proficiency_bonus: i64) -> i64 {
    modifier(
        scores.score(skill.ability),
        skill.proficiency,
        proficiency_bonus,
    ) + skill.custom_modifier
}

/// Total bonus for a saving throw
pub fn saving_throw_modifier(
    scores: &AbilityScores,
    saves: &SavingThrows,
    ability: Ability,
    proficiency_bonus: i64,
) -> i64 {
    modifier(scores.score(ability), saves.level(ability), proficiency_bonus)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_ability_modifier_table() {
        let cases = [
            (1, -5),
            (7, -2),
            (8, -1),
            (9, -1),
            (10, 0),
            (11, 0),
            (12, 1),
            (15, 2),
            (20, 5),
            (30, 10),
        ];
        for (score, expected) in cases {
            assert_eq!(ability_modifier(score), expected, "score {}", score);
        }
    }

    #[test]
    fn test_negative_scores_floor() {
        assert_eq!(ability_modifier(0), -5);
        assert_eq!(ability_modifier(-1), -6);
        assert_eq!(ability_modifier(-2), -6);
    }

    #[test]
    fn test_proficiency_multiplier() {
        assert_eq!(modifier(14, ProficiencyLevel::None, 3), 2);
        assert_eq!(modifier(14, ProficiencyLevel::Proficient, 3), 5);
        assert_eq!(modifier(14, ProficiencyLevel::Expertise, 3), 8);
    }

    #[test]
    fn test_skill_modifier_adds_custom() {
        let scores = AbilityScores {
            dexterity: 16,
            ..AbilityScores::default()
        };
        let skill = SkillDetail {
            id: None,
            character_id: "c".to_string(),
            skill_id: 3,
            name: "Stealth".to_string(),
            ability: Ability::Dexterity,
            proficiency: ProficiencyLevel::Proficient,
            custom_modifier: 1,
            created_at: None,
            updated_at: None,
        };
        assert_eq!(skill_modifier(&scores, &skill, 2), 3 + 2 + 1);
    }

    #[test]
    fn test_saving_throw_modifier() {
        let scores = AbilityScores {
            wisdom: 13,
            ..AbilityScores::default()
        };
        let saves = SavingThrows {
            wisdom: ProficiencyLevel::Proficient,
            ..SavingThrows::default()
        };
        assert_eq!(saving_throw_modifier(&scores, &saves, Ability::Wisdom, 2), 3);
        assert_eq!(saving_throw_modifier(&scores, &saves, Ability::Strength, 2), 0);
    }

    proptest! {
        #[test]
        fn prop_matches_real_floor(score in -50i64..80, bonus in 0i64..10, level in 0i64..3) {
            let level = ProficiencyLevel::from_ordinal(level).unwrap();
            let expected = ((score - 10) as f64 / 2.0).floor() as i64 + bonus * level.ordinal();
            prop_assert_eq!(modifier(score, level, bonus), expected);
        }
    }
}
