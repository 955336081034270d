use super::common::Breadcrumb;

declare_item! {
    /// A news or blog article.
    pub struct Article {
        headline: Option<String> => "headline",
        /// Publication date, normalized to ISO 8601 when it could be parsed.
        date_published: Option<String> => "datePublished",
        /// Publication date exactly as it appears on the page.
        date_published_raw: Option<String> => "datePublishedRaw",
        date_modified: Option<String> => "dateModified",
        date_modified_raw: Option<String> => "dateModifiedRaw",
        /// Author names as one string.
        author: Option<String> => "author",
        /// Author names split into a list.
        authors_list: Option<Vec<String>> => "authorsList",
        /// Language of the article as an ISO 639-1 code.
        in_language: Option<String> => "inLanguage",
        breadcrumbs: Option<Vec<Breadcrumb>> => "breadcrumbs",
        main_image: Option<String> => "mainImage",
        images: Option<Vec<String>> => "images",
        /// Short summary of the article.
        description: Option<String> => "description",
        /// Text of the article with markup removed.
        article_body: Option<String> => "articleBody",
        /// Cleaned, normalized HTML of the article body.
        article_body_html: Option<String> => "articleBodyHtml" { "format": "html" },
        /// Article body HTML as found on the page.
        article_body_raw: Option<String> => "articleBodyRaw" { "format": "html" },
        video_urls: Option<Vec<String>> => "videoUrls",
        audio_urls: Option<Vec<String>> => "audioUrls",
        /// Confidence that the page is an article, from 0 to 1.
        probability: Option<f64> => "probability",
        canonical_url: Option<String> => "canonicalUrl",
        url: Option<String> => "url",
    }
}
