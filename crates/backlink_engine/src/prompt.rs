use backlink_core::ContentType;

use crate::GenerateRequest;

pub(crate) const CONTENT_SYSTEM_PROMPT: &str = "You are an SEO and content expert. Generate backlink \
content in the specified language. Create natural, original content using the given URL and keyword. \
Embed the keyword as an HTML link in each piece of content. Write only the requested content, no \
additional explanations or titles. Strictly adhere to the specified word count.";

/// Language used for descriptions when the caller does not pick one.
pub(crate) const DEFAULT_DESCRIBE_LANGUAGE: &str = "Turkish";

const LANGUAGE_NAMES: [(&str, &str); 12] = [
    ("Türkçe", "Turkish"),
    ("İngilizce", "English"),
    ("Almanca", "German"),
    ("Fransızca", "French"),
    ("İspanyolca", "Spanish"),
    ("İtalyanca", "Italian"),
    ("Portekizce", "Portuguese"),
    ("Rusça", "Russian"),
    ("Arapça", "Arabic"),
    ("Japonca", "Japanese"),
    ("Korece", "Korean"),
    ("Çince", "Chinese"),
];

/// Maps a UI language name to the English name the model is told to write
/// in. Unknown names pass through unchanged.
pub fn target_language(name: &str) -> &str {
    LANGUAGE_NAMES
        .iter()
        .find(|(ui, _)| *ui == name)
        .map(|(_, english)| *english)
        .unwrap_or(name)
}

/// User prompt for one content batch.
pub fn build_content_prompt(request: &GenerateRequest) -> String {
    let language = target_language(&request.language);
    let keyword = &request.keyword;
    let link = format!("<a href=\"{}\">{}</a>", request.url, keyword);
    let count = request.batch_size;
    let words = request.word_count;

    let base = format!(
        "\nTarget Language: {language}\n\
         Brand: {brand}\n\
         Business Description: {description}\n\
         Link to insert: {link}\n\
         Number of contents to generate: {count}\n\
         Each content must be EXACTLY {words} words (strictly follow this rule!)\n",
        brand = request.brand,
        description = request.description,
    );

    let body = match request.prompt_type() {
        ContentType::Forum => format!(
            "Generate {count} different natural comment texts that can be used in forums and comment sections in {language}.\n\
             Each comment must be EXACTLY {words} words. Strictly adhere to the word count!\n\
             Use this HTML link instead of the keyword \"{keyword}\": {link}\n\
             Comments should be natural and not look like spam. Write only the content, no additional explanations.\n\
             Separate each comment with ---"
        ),
        ContentType::Bio => format!(
            "Generate {count} different bio/about texts for website profile pages and about sections in {language}.\n\
             Each text must be EXACTLY {words} words.\n\
             Use this HTML link instead of the keyword \"{keyword}\": {link}\n\
             \n\
             RULES:\n\
             - Do NOT use first-person pronouns (I, We, Our, Us)\n\
             - Use the brand name in third person (e.g., \"{brand} is a leading...\")\n\
             - Do NOT write in comment or forum style\n\
             - Use natural, fluent, and quality language\n\
             - Create professional but not artificial content that supports brand identity\n\
             - Only provide information, do not ask questions or give advice\n\
             \n\
             Write only the content. Separate each text with ---",
            brand = request.brand,
        ),
        ContentType::Article => format!(
            "Generate {count} different paragraphs that can be used in blog posts or articles in {language}.\n\
             Each paragraph must be EXACTLY {words} words. Strictly adhere to the word count!\n\
             Use this HTML link instead of the keyword \"{keyword}\": {link}\n\
             Paragraphs should be informative and natural. Write only the content, no additional explanations.\n\
             Separate each paragraph with ---"
        ),
        ContentType::Social => format!(
            "Generate {count} different texts that can be used in social media posts in {language}.\n\
             Each text must be EXACTLY {words} words. Strictly adhere to the word count!\n\
             Use this HTML link instead of the keyword \"{keyword}\": {link}\n\
             Texts should be attention-grabbing and shareable. Write only the content, no additional explanations.\n\
             Separate each text with ---"
        ),
    };

    format!("{base}{body}")
}

/// System prompt asking for a short business description in `language`.
pub(crate) fn describe_system_prompt(language: Option<&str>) -> String {
    let language = language
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(target_language)
        .unwrap_or(DEFAULT_DESCRIBE_LANGUAGE);
    format!(
        "You are a business analyst and SEO expert. From the given website content, analyse what \
         the business does and which services or products it offers, then write a short, concise \
         business description. The description must be 2-4 sentences, written in {language} and \
         SEO friendly. Write only the description, add no other explanation."
    )
}

/// User prompt for the describe call: the source URL followed by the digest.
pub fn build_describe_prompt(url: &str, digest: &str) -> String {
    format!("URL: {url}\n\n{digest}")
}
