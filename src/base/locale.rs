//! Supported languages and the canned response templates for each.

use std::{convert::Infallible, fmt, str::FromStr};

use serde_with::{DeserializeFromStr, SerializeDisplay};

/// ISO 639-1 code of a supported language.
///
/// Parsing never fails: anything outside the supported set falls back to
/// English, so a stale or misconfigured frontend degrades instead of erroring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, SerializeDisplay, DeserializeFromStr)]
pub enum LanguageCode {
    #[default]
    En,
    Hi,
    Bn,
    Te,
    Ta,
    Mr,
    Gu,
    Kn,
    Ml,
    Pa,
}

impl LanguageCode {
    pub const ALL: [LanguageCode; 10] = [
        Self::En,
        Self::Hi,
        Self::Bn,
        Self::Te,
        Self::Ta,
        Self::Mr,
        Self::Gu,
        Self::Kn,
        Self::Ml,
        Self::Pa,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Hi => "hi",
            Self::Bn => "bn",
            Self::Te => "te",
            Self::Ta => "ta",
            Self::Mr => "mr",
            Self::Gu => "gu",
            Self::Kn => "kn",
            Self::Ml => "ml",
            Self::Pa => "pa",
        }
    }

    /// The English name of the language, used when prompting the model.
    pub fn name(&self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Hi => "Hindi",
            Self::Bn => "Bengali",
            Self::Te => "Telugu",
            Self::Ta => "Tamil",
            Self::Mr => "Marathi",
            Self::Gu => "Gujarati",
            Self::Kn => "Kannada",
            Self::Ml => "Malayalam",
            Self::Pa => "Punjabi",
        }
    }
}

impl FromStr for LanguageCode {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Infallible> {
        let code = match s.trim().to_lowercase().as_str() {
            "hi" => Self::Hi,
            "bn" => Self::Bn,
            "te" => Self::Te,
            "ta" => Self::Ta,
            "mr" => Self::Mr,
            "gu" => Self::Gu,
            "kn" => Self::Kn,
            "ml" => Self::Ml,
            "pa" => Self::Pa,
            _ => Self::En,
        };

        Ok(code)
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The canned doctor replies for one language.
#[derive(Debug, Clone, Copy)]
pub struct ResponseTemplates {
    pub greeting: &'static str,
    pub symptom_inquiry: &'static str,
    pub pain_scale: &'static str,
    pub duration: &'static str,
    pub emergency: &'static str,
    pub followup: &'static str,
}

const EN_TEMPLATES: ResponseTemplates = ResponseTemplates {
    greeting: "Hello! I'm your AI doctor assistant. How can I help you today?",
    symptom_inquiry: "Can you describe your symptoms in detail?",
    pain_scale: "On a scale of 1-10, how would you rate your pain?",
    duration: "How long have you been experiencing these symptoms?",
    emergency: "This sounds like it could be an emergency. Please seek immediate medical attention.",
    followup: "I recommend following up with a healthcare provider within 24-48 hours.",
};

const HI_TEMPLATES: ResponseTemplates = ResponseTemplates {
    greeting: "नमस्ते! मैं आपका AI डॉक्टर सहायक हूं। आज मैं आपकी कैसे मदद कर सकता हूं?",
    symptom_inquiry: "कृपया अपने लक्षणों का विस्तार से वर्णन करें?",
    pain_scale: "1-10 के पैमाने पर, आप अपने दर्द को कैसे रेट करेंगे?",
    duration: "आप कितने समय से इन लक्षणों का अनुभव कर रहे हैं?",
    emergency: "यह एक आपातकाल हो सकता है। कृपया तुरंत चिकित्सा सहायता लें।",
    followup: "मैं सुझाता हूं कि 24-48 घंटों के भीतर किसी स्वास्थ्य सेवा प्रदाता से संपर्क करें।",
};

/// The templates for a language, falling back to English where no
/// translation exists yet.
pub fn templates_for(language: LanguageCode) -> &'static ResponseTemplates {
    match language {
        LanguageCode::Hi => &HI_TEMPLATES,
        _ => &EN_TEMPLATES,
    }
}

// Tests.

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_infallible_and_falls_back_to_english() {
        assert_eq!("hi".parse::<LanguageCode>().unwrap(), LanguageCode::Hi);
        assert_eq!(" TA ".parse::<LanguageCode>().unwrap(), LanguageCode::Ta);
        assert_eq!("xx".parse::<LanguageCode>().unwrap(), LanguageCode::En);
        assert_eq!("".parse::<LanguageCode>().unwrap(), LanguageCode::En);
    }

    #[test]
    fn codes_round_trip_through_serde() {
        for code in LanguageCode::ALL {
            let encoded = serde_json::to_string(&code).unwrap();
            assert_eq!(encoded, format!("\"{code}\""));
            assert_eq!(serde_json::from_str::<LanguageCode>(&encoded).unwrap(), code);
        }
    }

    #[test]
    fn hindi_has_its_own_templates() {
        let templates = templates_for(LanguageCode::Hi);

        assert_eq!(templates.symptom_inquiry, "कृपया अपने लक्षणों का विस्तार से वर्णन करें?");
        assert_ne!(templates.greeting, templates_for(LanguageCode::En).greeting);
    }

    #[test]
    fn untranslated_languages_use_the_english_templates() {
        for code in [LanguageCode::Bn, LanguageCode::Te, LanguageCode::Pa] {
            assert_eq!(templates_for(code).greeting, templates_for(LanguageCode::En).greeting);
        }
    }

    #[test]
    fn every_language_resolves_to_full_templates() {
        for code in LanguageCode::ALL {
            let templates = templates_for(code);

            assert!(!templates.greeting.is_empty());
            assert!(!templates.emergency.is_empty());
            assert!(!templates.followup.is_empty());
        }
    }
}
