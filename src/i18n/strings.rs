use serde::Serialize;

/// All localized user-facing strings for a language
///
/// Served verbatim to the browser view; placeholders in braces are filled in
/// by the caller with `str::replace`.
#[derive(Debug, Clone, Serialize)]
pub struct LanguageStrings {
    // ==================== Header ====================
    pub header_title: &'static str,

    /// One-paragraph introduction under the header
    pub header_subtitle: &'static str,

    /// Label next to the language selector
    pub language: &'static str,

    // ==================== Upload ====================
    pub upload_title: &'static str,
    pub upload_drag_and_drop: &'static str,
    pub upload_select_image: &'static str,
    pub upload_uploading: &'static str,
    pub upload_supported_formats: &'static str,

    // ==================== Analysis ====================
    pub analysis_processing: &'static str,
    pub analysis_analyzing: &'static str,
    pub analysis_complete: &'static str,
    pub analysis_image_caption: &'static str,
    pub analysis_crop_identified: &'static str,
    pub analysis_disease_detected: &'static str,

    // ==================== Questions ====================
    pub questions_title: &'static str,
    pub questions_placeholder: &'static str,
    pub questions_ask_button: &'static str,
    pub questions_getting_answer: &'static str,

    // ==================== History ====================
    pub history_title: &'static str,
    pub history_empty: &'static str,
    pub history_empty_hint: &'static str,

    /// Placeholders: {count}
    pub history_question_count: &'static str,
    pub history_show_more: &'static str,
    pub history_show_less: &'static str,
    pub history_no_answer: &'static str,

    // ==================== Translation overlay ====================
    pub translating_title: &'static str,
    pub translating_wait: &'static str,

    // ==================== Notifications ====================
    /// Toast shown after every translation of a language switch succeeded
    pub translation_success: &'static str,

    /// Toast shown after a switch was rolled back
    /// Placeholders: {failed}, {total}
    pub translation_failure: &'static str,

    /// Alert shown when diagnosis fails
    pub upload_failed: &'static str,

    /// Alert shown when the selected file is not an acceptable image
    /// Placeholders: {reason}
    pub invalid_image: &'static str,

    /// Alert shown when a question could not be answered
    pub question_failed: &'static str,
}

// ==================== English Strings ====================

pub static ENGLISH_STRINGS: LanguageStrings = LanguageStrings {
    header_title: "🌱 Crop Disease Assistant",
    header_subtitle: "Upload your crop images, get disease diagnosis, and receive expert agricultural advice. Learn about your crop's health in 3 simple steps.",
    language: "Language",

    upload_title: "📤 Upload Crop Image",
    upload_drag_and_drop: "Drag and drop an image here, or click to select",
    upload_select_image: "Select Image",
    upload_uploading: "Uploading...",
    upload_supported_formats: "Supported formats: JPG, PNG, GIF",

    analysis_processing: "Processing your image...",
    analysis_analyzing: "Analyzing crop condition and identifying potential diseases",
    analysis_complete: "✅ Analysis Complete! Results are ready.",
    analysis_image_caption: "📝 Image Caption",
    analysis_crop_identified: "🌱 Crop Identified",
    analysis_disease_detected: "🦠 Disease Detected",

    questions_title: "Ask Questions",
    questions_placeholder: "Ask about this crop, disease, treatment, etc...",
    questions_ask_button: "Ask",
    questions_getting_answer: "Getting answer...",

    history_title: "📚 Question & Answer History",
    history_empty: "No questions asked yet",
    history_empty_hint: "Ask your first question",
    history_question_count: "{count} questions",
    history_show_more: "Show more",
    history_show_less: "Show less",
    history_no_answer: "No answer available",

    translating_title: "Translating",
    translating_wait: "Please wait...",

    translation_success: "Translation completed successfully!",
    translation_failure: "Translation failed ({failed} out of {total} translations failed). Content restored to original language.",
    upload_failed: "Image processing failed. Check backend logs.",
    invalid_image: "Please select an image file ({reason}).",
    question_failed: "Asking GPT failed. Check backend and OPENAI_API_KEY.",
};

// ==================== Bengali Strings ====================

pub static BENGALI_STRINGS: LanguageStrings = LanguageStrings {
    header_title: "🌱 ফসলের রোগ সহায়ক",
    header_subtitle: "আপনার ফসলের ছবি আপলোড করুন, রোগ নির্ণয় করুন এবং কৃষি বিশেষজ্ঞের পরামর্শ নিন। সহজ ৩ ধাপে আপনার ফসলের স্বাস্থ্য সম্পর্কে জানুন।",
    language: "ভাষা",

    upload_title: "📤 ফসলের ছবি আপলোড করুন",
    upload_drag_and_drop: "এখানে একটি ছবি টেনে এনে ছাড়ুন, অথবা নির্বাচন করতে ক্লিক করুন",
    upload_select_image: "ছবি নির্বাচন করুন",
    upload_uploading: "আপলোড হচ্ছে...",
    upload_supported_formats: "সমর্থিত ফরম্যাট: JPG, PNG, GIF",

    analysis_processing: "আপনার ছবি প্রক্রিয়াকরণ করা হচ্ছে...",
    analysis_analyzing: "ফসলের অবস্থা বিশ্লেষণ এবং সম্ভাব্য রোগ সনাক্তকরণ",
    analysis_complete: "✅ বিশ্লেষণ সম্পূর্ণ! ফলাফল প্রস্তুত।",
    analysis_image_caption: "📝 ছবির বিবরণ",
    analysis_crop_identified: "🌱 সনাক্তকৃত ফসল",
    analysis_disease_detected: "🦠 শনাক্তকৃত রোগ",

    questions_title: "প্রশ্ন করুন",
    questions_placeholder: "এই ফসল, রোগ, চিকিৎসা ইত্যাদি সম্পর্কে জিজ্ঞাসা করুন...",
    questions_ask_button: "জিজ্ঞাসা করুন",
    questions_getting_answer: "উত্তর পাওয়া হচ্ছে...",

    history_title: "📚 প্রশ্ন ও উত্তরের ইতিহাস",
    history_empty: "এখনো কোনো প্রশ্ন করা হয়নি",
    history_empty_hint: "আপনার প্রথম প্রশ্ন করুন",
    history_question_count: "{count} প্রশ্ন",
    history_show_more: "আরও দেখুন",
    history_show_less: "কম দেখুন",
    history_no_answer: "কোনো উত্তর পাওয়া যায়নি",

    translating_title: "ভাষা পরিবর্তন",
    translating_wait: "অনুগ্রহ করে অপেক্ষা করুন...",

    translation_success: "অনুবাদ সফলভাবে সম্পন্ন হয়েছে!",
    translation_failure: "অনুবাদ ব্যর্থ হয়েছে ({total}টির মধ্যে {failed}টি অনুবাদ ব্যর্থ)। বিষয়বস্তু আগের ভাষায় ফিরিয়ে আনা হয়েছে।",
    upload_failed: "ছবি প্রক্রিয়াকরণ ব্যর্থ হয়েছে। ব্যাকএন্ড লগ দেখুন।",
    invalid_image: "অনুগ্রহ করে একটি ছবি নির্বাচন করুন ({reason})।",
    question_failed: "প্রশ্নের উত্তর পাওয়া যায়নি। ব্যাকএন্ড এবং OPENAI_API_KEY পরীক্ষা করুন।",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translation_failure_placeholders() {
        for strings in [&ENGLISH_STRINGS, &BENGALI_STRINGS] {
            assert!(strings.translation_failure.contains("{failed}"));
            assert!(strings.translation_failure.contains("{total}"));
        }
    }

    #[test]
    fn test_question_count_placeholder() {
        assert!(ENGLISH_STRINGS.history_question_count.contains("{count}"));
        assert!(BENGALI_STRINGS.history_question_count.contains("{count}"));
    }

    #[test]
    fn test_invalid_image_placeholder() {
        assert!(ENGLISH_STRINGS.invalid_image.contains("{reason}"));
        assert!(BENGALI_STRINGS.invalid_image.contains("{reason}"));
    }

    #[test]
    fn test_bengali_strings_differ_from_english() {
        assert_ne!(ENGLISH_STRINGS.header_title, BENGALI_STRINGS.header_title);
        assert_ne!(
            ENGLISH_STRINGS.translation_success,
            BENGALI_STRINGS.translation_success
        );
    }

    #[test]
    fn test_strings_serialize_by_field_name() {
        let json = serde_json::to_value(&ENGLISH_STRINGS).expect("serialize");
        assert_eq!(json["questions_ask_button"], "Ask");
        assert_eq!(json["language"], "Language");
    }
}
