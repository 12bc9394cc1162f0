//! 音色目录与快捷短语

use super::{VoiceGender, VoiceName, VoiceOption};

/// 可用音色列表
pub const AVAILABLE_VOICES: &[VoiceOption] = &[
    VoiceOption {
        id: VoiceName::Orus,
        name: "Orus",
        description: "Default voice option.",
        gender: VoiceGender::Male,
    },
    VoiceOption {
        id: VoiceName::Umbriel,
        name: "Umbriel",
        description: "Deep, calm, male tone. Natural and composed.",
        gender: VoiceGender::Male,
    },
    VoiceOption {
        id: VoiceName::Algenib,
        name: "Algenib",
        description: "Resonant, clear, professional male voice.",
        gender: VoiceGender::Male,
    },
    VoiceOption {
        id: VoiceName::Sadaltager,
        name: "Sadaltager",
        description: "Steady, authoritative conversation. Clear articulation.",
        gender: VoiceGender::Male,
    },
    VoiceOption {
        id: VoiceName::Charon,
        name: "Charon",
        description: "Deeper, resonant voice. Authoritative yet calm.",
        gender: VoiceGender::Male,
    },
    VoiceOption {
        id: VoiceName::Fenrir,
        name: "Fenrir",
        description: "Energetic and crisp. Good for louder environments.",
        gender: VoiceGender::Male,
    },
    VoiceOption {
        id: VoiceName::Puck,
        name: "Puck",
        description: "Soft, mid-range tone. Good for casual conversation.",
        gender: VoiceGender::Male,
    },
];

/// 快捷短语
pub const QUICK_PHRASES: &[&str] = &[
    "Thank you.",
    "Yes, please.",
    "No, thanks.",
    "Hi! I have laryngitis and shouldn't really talk.",
    "Could you repeat that?",
    "Just a sec.",
    "I made this app to talk for me :)",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_covers_every_voice_once() {
        assert_eq!(AVAILABLE_VOICES.len(), VoiceName::ALL.len());
        for voice in VoiceName::ALL {
            let count = AVAILABLE_VOICES.iter().filter(|o| o.id == voice).count();
            assert_eq!(count, 1, "{} listed {} times", voice, count);
        }
    }

    #[test]
    fn test_catalog_names_match_ids() {
        for option in AVAILABLE_VOICES {
            assert_eq!(option.name, option.id.as_str());
        }
    }

    #[test]
    fn test_catalog_voices_are_male() {
        assert!(AVAILABLE_VOICES
            .iter()
            .all(|option| option.gender == VoiceGender::Male));
    }
}
