use crate::answer::FALLBACK_CHAPTER;

pub const MORE_CONTENT_MARKER: &str = "[किताब का और भी हिस्सा है...]";

/// Builds the single user prompt sent to the model. Only `first_chunk` is
/// embedded; when `chunk_count > 1` the prompt notes that the book continues.
pub fn build_answer_prompt(first_chunk: &str, chunk_count: usize, question: &str) -> String {
    let continuation = if chunk_count > 1 {
        format!("\n\n{MORE_CONTENT_MARKER}")
    } else {
        String::new()
    };

    format!(
        "आप एक किताब विश्लेषण AI एजेंट हैं। नीचे दी गई किताब का टेक्स्ट पढ़ें और सवाल का जवाब दें।

किताब का टेक्स्ट:
{first_chunk}{continuation}

सवाल: {question}

कृपया निम्नलिखित JSON फॉर्मेट में जवाब दें:
{{
  \"chapter\": \"अध्याय/पाठ का नाम या नंबर (अगर मिले तो)\",
  \"pageNumber\": \"अनुमानित पेज नंबर या सेक्शन\",
  \"answer\": \"सवाल का विस्तृत जवाब\"
}}

नोट:
- अगर अध्याय का नाम नहीं मिले तो \"{FALLBACK_CHAPTER}\" लिखें
- जवाब उसी भाषा में दें जिसमें किताब लिखी है
- जवाब संक्षिप्त लेकिन पूर्ण होना चाहिए"
    )
}
