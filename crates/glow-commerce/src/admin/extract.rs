//! Product detail extraction from a pasted product URL.
//!
//! Nothing is fetched over the network. The title is guessed from the URL
//! path, the category comes from the resolver, and price, rating and review
//! count are plausible placeholders the admin is expected to correct.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use once_cell::sync::Lazy;
use rand::Rng;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use url::Url;

use super::ExtractError;
use crate::catalog::{Category, ProductDraft};
use crate::resolver;

/// Title used when nothing usable is found in the URL.
pub const MANUAL_TITLE: &str = "Enter Product Title Manually";

const MAX_TITLE_CHARS: usize = 80;

static WORD_START: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w").expect("valid regex"));
static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid regex"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));
static PAGE_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\.(html|htm|php)$").expect("valid regex"));
static CONNECTOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(And|The|Of|For|With|In|On|At|By)\b").expect("valid regex")
});
static LEADING_CONNECTOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(and|the|of|for|with|in|on|at|by)\b").expect("valid regex")
});

/// Site family, which decides the title heuristic and the placeholder ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Site {
    Amazon,
    Flipkart,
    Other,
}

impl Site {
    fn of(host: &str) -> Self {
        if host.contains("amazon") {
            Site::Amazon
        } else if host.contains("flipkart") {
            Site::Flipkart
        } else {
            Site::Other
        }
    }

    fn review_snippet(self) -> &'static str {
        match self {
            Site::Amazon => {
                "Great quality product. Fast delivery and exactly as described. Would buy again!"
            }
            Site::Flipkart => "Excellent product with good build quality. Value for money purchase!",
            Site::Other => {
                "Good quality product with excellent features. Satisfied with the purchase."
            }
        }
    }

    /// `(price base, price span, rating base, rating span, reviews base, reviews span)`
    fn ranges(self) -> (f64, f64, f64, f64, u64, u64) {
        match self {
            Site::Amazon => (15.0, 200.0, 3.5, 1.5, 50, 1000),
            Site::Flipkart => (12.0, 150.0, 3.8, 1.2, 30, 800),
            Site::Other => (10.0, 120.0, 3.5, 1.5, 25, 400),
        }
    }
}

/// Details guessed from a product URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedProduct {
    pub title: String,
    pub category: Category,
    pub price: f64,
    pub rating: f64,
    pub reviews: u64,
    pub review_snippet: String,
    pub affiliate_link: String,
}

impl ExtractedProduct {
    /// Guess details for `url` using `rng` for the placeholder numbers.
    pub fn from_url<R: Rng + ?Sized>(url: &str, rng: &mut R) -> Result<Self, ExtractError> {
        if url.is_empty() {
            return Err(ExtractError::MissingUrl);
        }
        let parsed = Url::parse(url).map_err(|e| ExtractError::Failed(e.to_string()))?;
        let site = Site::of(parsed.host_str().unwrap_or_default());

        let segments: Vec<&str> = parsed
            .path_segments()
            .map(|segments| segments.filter(|s| !s.is_empty()).collect())
            .unwrap_or_default();

        let title = clean_title(guess_title(site, &segments));
        let category = resolver::resolve(url, &title);

        let (price_base, price_span, rating_base, rating_span, reviews_base, reviews_span) =
            site.ranges();
        let price = round_to(rng.gen::<f64>() * price_span + price_base, 2);
        let rating = round_to(rng.gen::<f64>() * rating_span + rating_base, 1);
        let reviews = rng.gen_range(reviews_base..reviews_base + reviews_span);

        Ok(Self {
            title,
            category,
            price,
            rating,
            reviews,
            review_snippet: site.review_snippet().to_string(),
            affiliate_link: url.to_string(),
        })
    }

    /// Message shown to the admin after a successful extraction.
    pub fn summary(&self) -> String {
        format!(
            "Product details extracted successfully! Detected as {} category.",
            self.category
        )
    }
}

impl From<ExtractedProduct> for ProductDraft {
    fn from(extracted: ExtractedProduct) -> Self {
        ProductDraft {
            title: extracted.title,
            image: String::new(),
            additional_images: String::new(),
            price: Some(extracted.price),
            rating: Some(extracted.rating),
            reviews: Some(extracted.reviews),
            review_snippet: extracted.review_snippet,
            affiliate_link: extracted.affiliate_link,
            category: extracted.category,
        }
    }
}

fn guess_title(site: Site, segments: &[&str]) -> String {
    match site {
        Site::Amazon => {
            let mut name = segments
                .iter()
                .position(|s| *s == "dp" || *s == "gp")
                .filter(|&i| i > 0)
                .map(|i| amazon_words(segments[i - 1]))
                .unwrap_or_default();

            if name.chars().count() < 5 {
                if let Some(part) = segments.iter().find(|s| {
                    s.len() > 10 && s.contains('-') && !s.contains("dp") && !s.contains("ref")
                }) {
                    name = amazon_words(part);
                }
            }
            name
        }
        Site::Flipkart => segments
            .iter()
            .find(|s| s.contains("-p-"))
            .and_then(|s| s.split("-p-").next())
            .map(|part| collapse(&capitalize_words(&part.replace('-', " "))))
            .unwrap_or_default(),
        Site::Other => {
            let longest = segments
                .iter()
                .filter(|s| s.len() > 5 && !s.contains('.'))
                .fold(None::<&str>, |best, s| match best {
                    Some(b) if b.len() >= s.len() => Some(b),
                    _ => Some(*s),
                });
            longest
                .map(|part| {
                    let words = capitalize_words(&part.replace(['-', '_'], " "));
                    collapse(&PAGE_SUFFIX.replace(&words, ""))
                })
                .unwrap_or_default()
        }
    }
}

fn amazon_words(segment: &str) -> String {
    let words = capitalize_words(&segment.replace('-', " "));
    collapse(&DIGITS.replace_all(&words, ""))
}

fn capitalize_words(text: &str) -> String {
    WORD_START
        .replace_all(text, |caps: &Captures| caps[0].to_uppercase())
        .into_owned()
}

fn collapse(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

fn clean_title(name: String) -> String {
    if name.is_empty() {
        return MANUAL_TITLE.to_string();
    }

    let lowered = CONNECTOR.replace_all(&name, |caps: &Captures| caps[0].to_lowercase());
    let led = LEADING_CONNECTOR.replace(&lowered, |caps: &Captures| capitalize_words(&caps[0]));
    let title: String = led.chars().take(MAX_TITLE_CHARS).collect();
    let title = title.trim();

    if title.chars().count() < 3 {
        MANUAL_TITLE.to_string()
    } else {
        title.to_string()
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Guesses product details after a fixed delay that stands in for a
/// remote fetch.
#[derive(Debug, Clone)]
pub struct ProductExtractor {
    delay: Duration,
}

impl Default for ProductExtractor {
    fn default() -> Self {
        Self::new(Duration::from_millis(1500))
    }
}

impl ProductExtractor {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Extract details for `url`.
    ///
    /// An empty URL fails immediately; anything else waits for the delay
    /// first.
    pub async fn extract(&self, url: &str) -> Result<ExtractedProduct, ExtractError> {
        if url.is_empty() {
            return Err(ExtractError::MissingUrl);
        }

        tracing::debug!(url, delay_ms = self.delay.as_millis() as u64, "extracting product details");
        tokio::time::sleep(self.delay).await;

        let result = ExtractedProduct::from_url(url, &mut rand::thread_rng());
        match &result {
            Ok(product) => {
                tracing::info!(title = %product.title, category = %product.category, "product details extracted")
            }
            Err(e) => tracing::warn!(url, error = %e, "product detail extraction failed"),
        }
        result
    }
}

/// An extraction running on the runtime that can be cancelled.
#[derive(Debug)]
pub struct ExtractionTask {
    cancel: Arc<Notify>,
    handle: JoinHandle<Result<ExtractedProduct, ExtractError>>,
}

impl ExtractionTask {
    /// Start extracting `url`. Must be called from within a tokio runtime.
    pub fn spawn(extractor: ProductExtractor, url: impl Into<String>) -> Self {
        let url = url.into();
        let cancel = Arc::new(Notify::new());
        let cancelled = Arc::clone(&cancel);

        let handle = tokio::spawn(async move {
            tokio::select! {
                result = extractor.extract(&url) => result,
                _ = cancelled.notified() => {
                    tracing::debug!(url = %url, "extraction cancelled");
                    Err(ExtractError::Cancelled)
                }
            }
        });

        Self { cancel, handle }
    }

    /// Stop the extraction. The task resolves to [`ExtractError::Cancelled`]
    /// unless it already finished.
    pub fn cancel(&self) {
        self.cancel.notify_one();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the result.
    pub async fn join(self) -> Result<ExtractedProduct, ExtractError> {
        self.await
    }
}

impl Future for ExtractionTask {
    type Output = Result<ExtractedProduct, ExtractError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.handle)
            .poll(cx)
            .map(|joined| joined.unwrap_or(Err(ExtractError::Cancelled)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn extract(url: &str) -> ExtractedProduct {
        ExtractedProduct::from_url(url, &mut StdRng::seed_from_u64(7)).unwrap()
    }

    #[test]
    fn test_amazon_title_before_dp() {
        let product =
            extract("https://www.amazon.com/Maybelline-Lash-Sensational-Mascara-Black/dp/B00PFCT1X2/ref=sr_1_1");
        assert_eq!(product.title, "Maybelline Lash Sensational Mascara Black");
        assert_eq!(product.category, Category::Makeup);
    }

    #[test]
    fn test_amazon_descriptive_fallback_strips_digits() {
        let product = extract("https://amazon.in/dp/B01/cerave-moisturizing-cream-16oz");
        assert_eq!(product.title, "Cerave Moisturizing Cream oz");
        assert_eq!(product.category, Category::Skincare);
    }

    #[test]
    fn test_flipkart_title() {
        let product = extract("https://www.flipkart.com/nivea-men-face-wash-p-itm123/p/itm");
        assert_eq!(product.title, "Nivea Men Face Wash");
        assert_eq!(product.category, Category::Men);
    }

    #[test]
    fn test_generic_longest_segment_and_connectors() {
        let product = extract("https://shop.example/beauty/the_art_of_perfume_oils");
        assert_eq!(product.title, "The Art of Perfume Oils");
        assert_eq!(product.category, Category::Fragrance);
    }

    #[test]
    fn test_no_usable_segment() {
        let product = extract("https://shop.example/a/b.html");
        assert_eq!(product.title, MANUAL_TITLE);
    }

    #[test]
    fn test_title_truncated() {
        let long = "word-".repeat(40);
        let product = extract(&format!("https://shop.example/{long}"));
        assert!(product.title.chars().count() <= MAX_TITLE_CHARS);
    }

    #[test]
    fn test_placeholder_ranges() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let p = ExtractedProduct::from_url("https://www.flipkart.com/x-p-1", &mut rng).unwrap();
            assert!((12.0..=162.0).contains(&p.price));
            assert!((3.8..=5.0).contains(&p.rating));
            assert!((30..830).contains(&p.reviews));
            assert_eq!(p.price, round_to(p.price, 2));
        }
    }

    #[test]
    fn test_errors() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            ExtractedProduct::from_url("", &mut rng),
            Err(ExtractError::MissingUrl)
        );
        let err = ExtractedProduct::from_url("not a url", &mut rng).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to fetch product details. Please try again or enter details manually."
        );
    }

    #[test]
    fn test_into_draft() {
        let product = extract("https://shop.example/rose-face-serum");
        let draft: ProductDraft = product.clone().into();
        assert!(draft.image.is_empty());
        assert_eq!(draft.affiliate_link, "https://shop.example/rose-face-serum");
        assert_eq!(draft.price, Some(product.price));
        assert_eq!(draft.category, Category::Skincare);
    }

    #[tokio::test(start_paused = true)]
    async fn test_extract_waits_for_delay() {
        let extractor = ProductExtractor::new(Duration::from_millis(1500));
        let start = tokio::time::Instant::now();
        extractor.extract("https://shop.example/rose-face-serum").await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(1500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_url_is_immediate() {
        let extractor = ProductExtractor::default();
        let start = tokio::time::Instant::now();
        assert_eq!(extractor.extract("").await, Err(ExtractError::MissingUrl));
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_task() {
        let task = ExtractionTask::spawn(
            ProductExtractor::default(),
            "https://shop.example/rose-face-serum",
        );
        task.cancel();
        assert_eq!(task.join().await, Err(ExtractError::Cancelled));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_after_finish_keeps_result() {
        let mut task = ExtractionTask::spawn(
            ProductExtractor::new(Duration::from_millis(10)),
            "https://shop.example/rose-face-serum",
        );
        tokio::time::sleep(Duration::from_millis(20)).await;
        task.cancel();
        let product = (&mut task).await.unwrap();
        assert_eq!(product.category, Category::Skincare);
    }
}
