//! 正式程度等级表
//!
//! 每种目标语言对应一张固定的等级表，按从最随意到最正式排列：
//! 索引0最极端随意，中间索引为日常中性，最后一个为最正式或古语。

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;

/// 一个正式程度等级：简短标题加上发送给模型的说明
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormalityLevel {
    pub title: &'static str,
    pub description: &'static str,
}

/// 英语等级表
pub static ENGLISH_LEVELS: [FormalityLevel; 7] = [
    FormalityLevel {
        title: "Reddit",
        description: "A very distinct form of slang, jargon, and a shared vocabulary that's often incomprehensible to people who don't spend a lot of time on the platform.",
    },
    FormalityLevel {
        title: "Street Slang",
        description: "The most informal and current slang, often originating from specific subcultures or regions.",
    },
    FormalityLevel {
        title: "Casual",
        description: "Everyday language used with friends and family. It includes some slang and contractions.",
    },
    FormalityLevel {
        title: "Standard",
        description: "Neutral and widely understood English. Appropriate for most social and professional settings.",
    },
    FormalityLevel {
        title: "Formal",
        description: "Language used in professional documents, academic papers, and official speeches.",
    },
    FormalityLevel {
        title: "Official/Archaic",
        description: "Highly formal, often specialized language. This level includes legal, scientific, or ceremonial terms, and may contain older or less common words.",
    },
    FormalityLevel {
        title: "Shakespearean",
        description: "A form of Early Modern English, a transitional stage of the language that is understandable to a modern speaker but includes distinct grammatical rules and vocabulary. It is characterized by the use of \"thou,\" \"thee,\" and \"thy,\" and a more flexible word order, often used for poetic effect.",
    },
];

/// 日语等级表
pub static JAPANESE_LEVELS: [FormalityLevel; 7] = [
    FormalityLevel {
        title: "ヤンキー",
        description: "Extremely rude, aggressive, and disrespectful street slang, often associated with delinquents (Yankii). This style is intentionally confrontational and offensive.",
    },
    FormalityLevel {
        title: "若者言葉 (Wakamono Kotoba)",
        description: "Literally 'young person's language.' This refers to current slang and language trends among youth.",
    },
    FormalityLevel {
        title: "友達言葉 (Tomodachi Kotoba)",
        description: "'Friend language.' This is casual, familiar speech used among close friends.",
    },
    FormalityLevel {
        title: "日常会話 (Nichijō Kaiwa)",
        description: "'Daily conversation.' This is the standard, neutral language used in most everyday situations.",
    },
    FormalityLevel {
        title: "丁寧語 (Teineigo)",
        description: "'Polite language.' This is a fundamental level of formal speech, using polite endings like −masu and −desu.",
    },
    FormalityLevel {
        title: "尊敬語・謙譲語 (Sonkeigo/Kenjōgo)",
        description: "'Respectful/Humble language.' This is the highest level of formality, used to show extreme respect to superiors or to speak humbly about oneself. These are also known as 敬語 (Keigo), or honorific language.",
    },
    FormalityLevel {
        title: "古語 (Kogo)",
        description: "Literally 'old language.' This term generally refers to the vocabulary and grammar of Japanese spoken before the Meiji period (1868-1912). It is the language of classical literature, such as The Tale of Genji and The Pillow Book.",
    },
];

/// 支持的目标语言
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum TargetLanguage {
    #[default]
    #[value(alias = "en")]
    English,
    #[value(alias = "ja")]
    Japanese,
}

impl TargetLanguage {
    /// 发送给模型的语言名称
    pub fn name(self) -> &'static str {
        match self {
            TargetLanguage::English => "English",
            TargetLanguage::Japanese => "Japanese",
        }
    }

    /// 该语言的等级表
    pub fn levels(self) -> &'static [FormalityLevel] {
        match self {
            TargetLanguage::English => &ENGLISH_LEVELS,
            TargetLanguage::Japanese => &JAPANESE_LEVELS,
        }
    }

    /// 等级表的中点索引（日常中性）
    pub fn default_level_index(self) -> usize {
        self.levels().len() / 2
    }

    pub fn level(self, index: usize) -> Option<&'static FormalityLevel> {
        self.levels().get(index)
    }
}

impl fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TargetLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <TargetLanguage as ValueEnum>::from_str(s.trim(), true)
            .map_err(|_| format!("unsupported language: {} (expected en or ja)", s.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_share_cardinality() {
        assert_eq!(ENGLISH_LEVELS.len(), JAPANESE_LEVELS.len());
        assert_eq!(TargetLanguage::English.levels().len(), 7);
    }

    #[test]
    fn test_midpoint_is_neutral() {
        let en = TargetLanguage::English;
        let ja = TargetLanguage::Japanese;
        assert_eq!(en.default_level_index(), 3);
        assert_eq!(en.level(3).map(|l| l.title), Some("Standard"));
        assert_eq!(
            ja.level(ja.default_level_index()).map(|l| l.title),
            Some("日常会話 (Nichijō Kaiwa)")
        );
    }

    #[test]
    fn test_extremes_ordering() {
        assert_eq!(ENGLISH_LEVELS[0].title, "Reddit");
        assert_eq!(ENGLISH_LEVELS[6].title, "Shakespearean");
        assert_eq!(JAPANESE_LEVELS[6].title, "古語 (Kogo)");
    }

    #[test]
    fn test_out_of_range_level() {
        assert!(TargetLanguage::Japanese.level(7).is_none());
    }

    #[test]
    fn test_parse_language_aliases() {
        assert_eq!("en".parse::<TargetLanguage>(), Ok(TargetLanguage::English));
        assert_eq!("Japanese".parse::<TargetLanguage>(), Ok(TargetLanguage::Japanese));
        assert_eq!(" JA ".parse::<TargetLanguage>(), Ok(TargetLanguage::Japanese));
        assert!("fr".parse::<TargetLanguage>().is_err());
    }
}
