//! Exam presets and duration formatting
//!
//! The catalogue covers the HKDSE written papers so exam setup can pick a
//! subject instead of typing its duration.

use serde::Serialize;

use crate::state::Language;

/// A known exam paper with its allotted time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamPreset {
    pub id: &'static str,
    pub en_title: &'static str,
    pub zh_title: &'static str,
    pub duration_minutes: u64,
}

impl ExamPreset {
    const fn new(
        id: &'static str,
        en_title: &'static str,
        zh_title: &'static str,
        duration_minutes: u64,
    ) -> Self {
        Self {
            id,
            en_title,
            zh_title,
            duration_minutes,
        }
    }

    /// Title in the given language
    pub fn title(&self, language: Language) -> &'static str {
        match language {
            Language::English => self.en_title,
            Language::TraditionalChinese => self.zh_title,
        }
    }
}

pub static EXAM_PRESETS: &[ExamPreset] = &[
    ExamPreset::new("va_1_2", "Visual Arts (I), (II)", "視覺藝術（一）、（二）", 240),
    ExamPreset::new("cl_1", "Chinese Language (I)", "中國語文（一）", 90),
    ExamPreset::new("cl_2", "Chinese Language (II)", "中國語文（二）", 135),
    ExamPreset::new("el_1", "English Language (I)", "英國語文（一）", 90),
    ExamPreset::new("el_2", "English Language (II)", "英國語文（二）", 120),
    ExamPreset::new("el_3", "English Language (III) (Listening and Integrated Skills)", "英國語文（三）（聆聽及綜合能力考核）", 175),
    ExamPreset::new("math_cp_1", "Mathematics Compulsory Part (I)", "數學 必修部分（一）", 135),
    ExamPreset::new("math_cp_2", "Mathematics Compulsory Part (II)", "數學 必修部分（二）", 75),
    ExamPreset::new("csd", "Citizenship and Social Development", "公民與社會發展", 120),
    ExamPreset::new("ers_1", "Ethics & Religious Studies (I)", "倫理與宗教（一）", 105),
    ExamPreset::new("ers_2", "Ethics & Religious Studies (II)", "倫理與宗教（二）", 105),
    ExamPreset::new("chem_1", "Chemistry (I)", "化學（一）", 150),
    ExamPreset::new("chem_2", "Chemistry (II)", "化學（二）", 60),
    ExamPreset::new("hmsc_1", "Health Management & Social Care (I)", "健康管理與社會關懷（一）", 120),
    ExamPreset::new("hmsc_2", "Health Management & Social Care (II)", "健康管理與社會關懷（二）", 105),
    ExamPreset::new("ict_1", "Information & Communication Technology (I)", "資訊及通訊科技（一）", 120),
    ExamPreset::new("ict_2", "Information & Communication Technology (II)", "資訊及通訊科技（二）", 90),
    ExamPreset::new("bio_1", "Biology (I)", "生物（一）", 150),
    ExamPreset::new("bio_2", "Biology (II)", "生物（二）", 60),
    ExamPreset::new("bafs_1", "Business, Accounting & Financial Studies (I)", "企業、會計與財務概論（一）", 60),
    ExamPreset::new("bafs_2", "Business, Accounting & Financial Studies (II)", "企業、會計與財務概論（二）", 150),
    ExamPreset::new("phy_1", "Physics (I)", "物理（一）", 150),
    ExamPreset::new("phy_2", "Physics (II)", "物理（二）", 60),
    ExamPreset::new("dat_1", "Design & Applied Technology (I)", "設計與應用科技（一）", 120),
    ExamPreset::new("dat_2", "Design & Applied Technology (II)", "設計與應用科技（二）", 120),
    ExamPreset::new("lit_eng_1", "Literature in English (I)", "英語文學（一）", 180),
    ExamPreset::new("lit_eng_2", "Literature in English (II)", "英語文學（二）", 120),
    ExamPreset::new("lit_chin_1", "Chinese Literature (I)", "中國文學（一）", 120),
    ExamPreset::new("lit_chin_2", "Chinese Literature (II)", "中國文學（二）", 120),
    ExamPreset::new("tl_1", "Technology & Living (I)", "科技與生活（一）", 90),
    ExamPreset::new("tl_2", "Technology & Living (II)", "科技與生活（二）", 120),
    ExamPreset::new("pe_1", "Physical Education (I)", "體育（一）", 135),
    ExamPreset::new("pe_2", "Physical Education (II)", "體育（二）", 75),
    ExamPreset::new("music_1a", "Music 1A", "音樂 1A", 90),
    ExamPreset::new("music_1b", "Music 1B", "音樂 1B", 90),
    ExamPreset::new("geo_1", "Geography (I)", "地理（一）", 165),
    ExamPreset::new("geo_2", "Geography (II)", "地理（二）", 75),
    ExamPreset::new("ths_1", "Tourism & Hospitality Studies (I)", "旅遊與款待（一）", 90),
    ExamPreset::new("ths_2", "Tourism & Hospitality Studies (II)", "旅遊與款待（二）", 105),
    ExamPreset::new("hist_1", "History (I)", "歷史（一）", 120),
    ExamPreset::new("hist_2", "History (II)", "歷史（二）", 90),
    ExamPreset::new("math_m1", "Mathematics Extended Part Module (I)", "數學 延伸部分 單元（一）", 150),
    ExamPreset::new("math_m2", "Mathematics Extended Part Module (II)", "數學 延伸部分 單元（二）", 150),
    ExamPreset::new("chist_1", "Chinese History (I)", "中國歷史（一）", 135),
    ExamPreset::new("chist_2", "Chinese History (II)", "中國歷史（二）", 80),
    ExamPreset::new("econ_1", "Economics (I)", "經濟（一）", 60),
    ExamPreset::new("econ_2", "Economics (II)", "經濟（二）", 150),
];

/// Look up a preset by id
pub fn find_preset(id: &str) -> Option<&'static ExamPreset> {
    EXAM_PRESETS.iter().find(|preset| preset.id == id)
}

/// Human-readable exam length, e.g. "1 hour 30 minutes" or "1 小時 30 分鐘"
pub fn format_duration_from_minutes(total_minutes: u64, language: Language) -> String {
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    let mut parts = Vec::new();

    match language {
        Language::TraditionalChinese => {
            if hours > 0 {
                parts.push(format!("{} 小時", hours));
            }
            if minutes > 0 {
                parts.push(format!("{} 分鐘", minutes));
            }
            if parts.is_empty() {
                return "0 分鐘".to_string();
            }
        }
        Language::English => {
            if hours > 0 {
                parts.push(format!("{} hour{}", hours, plural(hours)));
            }
            if minutes > 0 {
                parts.push(format!("{} minute{}", minutes, plural(minutes)));
            }
            if parts.is_empty() {
                return "0 minutes".to_string();
            }
        }
    }

    parts.join(" ")
}

fn plural(count: u64) -> &'static str {
    if count > 1 {
        "s"
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_ids_are_unique() {
        let mut ids: Vec<_> = EXAM_PRESETS.iter().map(|preset| preset.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), EXAM_PRESETS.len());
    }

    #[test]
    fn find_preset_by_id() {
        let preset = find_preset("math_cp_2").unwrap();
        assert_eq!(preset.duration_minutes, 75);
        assert_eq!(preset.title(Language::English), "Mathematics Compulsory Part (II)");
        assert!(find_preset("astrology").is_none());
    }

    #[test]
    fn formats_english_durations() {
        assert_eq!(format_duration_from_minutes(0, Language::English), "0 minutes");
        assert_eq!(format_duration_from_minutes(1, Language::English), "1 minute");
        assert_eq!(format_duration_from_minutes(45, Language::English), "45 minutes");
        assert_eq!(format_duration_from_minutes(60, Language::English), "1 hour");
        assert_eq!(format_duration_from_minutes(90, Language::English), "1 hour 30 minutes");
        assert_eq!(format_duration_from_minutes(135, Language::English), "2 hours 15 minutes");
    }

    #[test]
    fn formats_chinese_durations() {
        let zh = Language::TraditionalChinese;
        assert_eq!(format_duration_from_minutes(0, zh), "0 分鐘");
        assert_eq!(format_duration_from_minutes(90, zh), "1 小時 30 分鐘");
        assert_eq!(format_duration_from_minutes(240, zh), "4 小時");
    }
}
