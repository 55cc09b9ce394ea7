use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref WORD: Regex = Regex::new(r"(?u)\p{L}[\p{L}\p{N}_']*").expect("valid regex");
}

/// Text-normalization boundary between raw text and the ranker.
///
/// Both the corpus and incoming queries pass through the same normalizer, so
/// the ranker only ever compares tokens under one contract. Swappable per
/// language.
pub trait Normalizer: Send + Sync {
    /// Full pipeline: NFKC, lowercase, tokenize, drop stopwords, stem.
    fn normalize(&self, text: &str) -> Vec<String>;

    /// Stems one already-clean lowercase word. Identity for languages
    /// without a stemmer. Used by the highlighter to match display words
    /// against query stems.
    fn stem_word(&self, word: &str) -> String;
}

/// Regex word extraction + stopword set + optional Snowball stemmer.
pub struct SnowballNormalizer {
    stemmer: Option<Stemmer>,
    stopwords: HashSet<&'static str>,
}

impl SnowballNormalizer {
    pub fn english() -> Self {
        Self {
            stemmer: Some(Stemmer::create(Algorithm::English)),
            stopwords: ENGLISH_STOPWORDS.iter().copied().collect(),
        }
    }

    /// Snowball carries no Indonesian algorithm, so this preset removes
    /// stopwords and leaves words unstemmed.
    pub fn indonesian() -> Self {
        Self {
            stemmer: None,
            stopwords: INDONESIAN_STOPWORDS.iter().copied().collect(),
        }
    }
}

impl Normalizer for SnowballNormalizer {
    fn normalize(&self, text: &str) -> Vec<String> {
        let lowered = text.nfkc().collect::<String>().to_lowercase();
        let mut tokens = Vec::new();
        for mat in WORD.find_iter(&lowered) {
            let word = mat.as_str();
            if self.stopwords.contains(word) {
                continue;
            }
            tokens.push(self.stem_word(word));
        }
        tokens
    }

    fn stem_word(&self, word: &str) -> String {
        match &self.stemmer {
            Some(stemmer) => stemmer.stem(word).to_string(),
            None => word.to_string(),
        }
    }
}

const ENGLISH_STOPWORDS: &[&str] = &[
    "a","about","above","after","again","against","all","am","an","and","any","are","aren't","as","at",
    "be","because","been","before","being","below","between","both","but","by",
    "can","can't","cannot","could","couldn't",
    "did","didn't","do","does","doesn't","doing","don't","down","during",
    "each","few","for","from","further",
    "had","hadn't","has","hasn't","have","haven't","having","he","he'd","he'll","he's","her","here","here's","hers","herself","him","himself","his","how","how's",
    "i","i'd","i'll","i'm","i've","if","in","into","is","isn't","it","it's","its","itself",
    "let's","me","more","most","mustn't","my","myself",
    "no","nor","not","of","off","on","once","only","or","other","ought","our","ours","ourselves","out","over","own",
    "same","she","she'd","she'll","she's","should","shouldn't","so","some","such",
    "than","that","that's","the","their","theirs","them","themselves","then","there","there's","these","they","they'd","they'll","they're","they've","this","those","through","to","too",
    "under","until","up","very",
    "was","wasn't","we","we'd","we'll","we're","we've","were","weren't","what","what's","when","when's","where","where's","which","while","who","who's","whom","why","why's","with","won't","would","wouldn't",
    "you","you'd","you'll","you're","you've","your","yours","yourself","yourselves",
];

const INDONESIAN_STOPWORDS: &[&str] = &[
    "ada","adalah","agak","agar","akan","aku","anda","antara","apa","apakah","atau",
    "bagai","bagaimana","bagi","bahkan","bahwa","banyak","begitu","belum","berada","bisa","boleh","bukan",
    "dahulu","dalam","dan","dapat","dari","daripada","demi","dengan","di","dia","dimana","dua",
    "guna","hal","hanya","harus","hingga",
    "ia","ialah","ini","itu","itulah",
    "jadi","jika","juga",
    "kah","kami","kamu","karena","ke","kecuali","kembali","kemana","kenapa","kepada","ketika","kita",
    "lagi","lain","lalu","lebih",
    "maka","masih","melainkan","mengapa","menjadi","menurut","mereka","merupakan",
    "namun","nanti",
    "oleh",
    "pada","para","pula","pun",
    "saat","saja","sambil","sampai","sangat","saya","sebagai","sebelum","secara","sedangkan","sehingga",
    "sekitar","selain","selagi","semua","seolah","seperti","seraya","serta","sesuatu","sesudah","setelah",
    "setiap","sudah","supaya",
    "tanpa","telah","tentang","terhadap","tersebut","tidak",
    "untuk",
    "yaitu","yakni","yang",
];
