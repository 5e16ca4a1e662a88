use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;

lazy_static::lazy_static! {
    static ref STOPWORDS: HashSet<&'static str> = {
        [
            "a", "ao", "aos", "aquela", "aquelas", "aquele", "aqueles", "aquilo", "as",
            "até", "com", "como", "da", "das", "de", "dela", "delas", "dele", "deles",
            "depois", "do", "dos", "e", "ela", "elas", "ele", "eles", "em", "entre",
            "era", "eram", "essa", "essas", "esse", "esses", "esta", "estamos", "estas",
            "estava", "estavam", "este", "esteja", "estejam", "estejamos", "estes",
            "esteve", "estive", "estivemos", "estiver", "estivera", "estiveram",
            "estiverem", "estivermos", "estivesse", "estivessem", "estou", "está",
            "estávamos", "estão", "eu", "foi", "fomos", "for", "fora", "foram", "forem",
            "formos", "fosse", "fossem", "fui", "fôramos", "fôssemos", "haja", "hajam",
            "hajamos", "havemos", "hei", "houve", "houvemos", "houver", "houvera",
            "houveram", "houverei", "houverem", "houveremos", "houveria", "houveriam",
            "houvermos", "houverá", "houverão", "houveríamos", "houvesse", "houvessem",
            "houvéramos", "houvéssemos", "há", "hão", "isso", "isto", "já", "lhe",
            "lhes", "mais", "mas", "me", "mesmo", "meu", "meus", "minha", "minhas",
            "muito", "na", "nas", "nem", "no", "nos", "nossa", "nossas", "nosso",
            "nossos", "num", "numa", "não", "nós", "o", "os", "ou", "para", "pela",
            "pelas", "pelo", "pelos", "por", "qual", "quando", "que", "quem", "se",
            "seja", "sejam", "sejamos", "sem", "ser", "serei", "seremos", "seria",
            "seriam", "será", "serão", "seríamos", "seu", "seus", "somos", "sou", "sua",
            "suas", "são", "só", "também", "te", "tem", "temos", "tenha", "tenham",
            "tenhamos", "tenho", "terei", "teremos", "teria", "teriam", "terá", "terão",
            "teríamos", "teu", "teus", "teve", "tinha", "tinham", "tive", "tivemos",
            "tiver", "tivera", "tiveram", "tiverem", "tivermos", "tivesse", "tivessem",
            "tivéramos", "tivéssemos", "tu", "tua", "tuas", "tínhamos", "um", "uma",
            "você", "vocês", "vos", "à", "às", "éramos", "é",
        ]
        .iter()
        .copied()
        .collect()
    };
}

/// Normalize raw text into an ordered sequence of raw tokens.
///
/// Lowercases, then keeps only lowercase Latin letters, the Latin-1 accented
/// ranges à..ú and À..Ú, and whitespace. Removal deletes the character
/// outright, so "foo,bar" collapses into a single token. Finally splits on
/// whitespace runs.
pub fn normalize(text: &str) -> Vec<String> {
    let kept: String = text
        .to_lowercase()
        .chars()
        .filter(|&c| is_kept(c))
        .collect();

    kept.split_whitespace().map(str::to_string).collect()
}

// The accented ranges are the Latin-1 blocks à..ú and À..Ú; ã, ç and õ fall
// inside them.
fn is_kept(c: char) -> bool {
    c.is_whitespace()
        || c.is_ascii_lowercase()
        || ('\u{00E0}'..='\u{00FA}').contains(&c)
        || ('\u{00C0}'..='\u{00DA}').contains(&c)
}

/// Stemming capability consumed by the lexical filter. Implementations must
/// be pure and deterministic.
pub trait Stem: Send + Sync {
    fn stem(&self, token: &str) -> String;
}

/// Snowball stemmer backed by `rust_stemmers`.
pub struct SnowballStemmer {
    stemmer: Stemmer,
}

impl SnowballStemmer {
    pub fn portuguese() -> Self {
        Self {
            stemmer: Stemmer::create(Algorithm::Portuguese),
        }
    }
}

impl Stem for SnowballStemmer {
    fn stem(&self, token: &str) -> String {
        self.stemmer.stem(token).to_string()
    }
}

/// Pass-through stemmer, for callers that want raw tokens as terms.
pub struct IdentityStemmer;

impl Stem for IdentityStemmer {
    fn stem(&self, token: &str) -> String {
        token.to_string()
    }
}

/// Drops stopwords and stems what remains, preserving order and duplicates.
pub struct LexicalFilter {
    stopwords: HashSet<String>,
    stemmer: Box<dyn Stem>,
}

impl LexicalFilter {
    pub fn new(stopwords: HashSet<String>, stemmer: Box<dyn Stem>) -> Self {
        Self { stopwords, stemmer }
    }

    /// Portuguese stopword list plus the Portuguese Snowball stemmer.
    pub fn portuguese() -> Self {
        let stopwords = STOPWORDS.iter().map(|s| s.to_string()).collect();
        Self::new(stopwords, Box::new(SnowballStemmer::portuguese()))
    }

    /// No stopwords, identity stemming. Terms are the raw normalized tokens.
    pub fn passthrough() -> Self {
        Self::new(HashSet::new(), Box::new(IdentityStemmer))
    }

    /// Filter an ordered token sequence.
    ///
    /// Stopword membership is tested on the unstemmed token, so a stem that
    /// happens to collide with a stopword is never dropped.
    pub fn filter(&self, tokens: Vec<String>) -> Vec<String> {
        tokens
            .into_iter()
            .filter(|t| !self.stopwords.contains(t.as_str()))
            .map(|t| self.stemmer.stem(&t))
            .collect()
    }

    /// Full pipeline: normalize then filter.
    pub fn analyze(&self, text: &str) -> Vec<String> {
        self.filter(normalize(text))
    }
}

impl Default for LexicalFilter {
    fn default() -> Self {
        Self::portuguese()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TruncStemmer;

    impl Stem for TruncStemmer {
        fn stem(&self, token: &str) -> String {
            token.chars().take(3).collect()
        }
    }

    #[test]
    fn test_normalize_strips_punctuation() {
        let tokens = normalize("Olá, mundo! 123 foo-bar");
        // Digits and punctuation are deleted without a separator.
        assert_eq!(tokens, vec!["olá", "mundo", "foobar"]);
    }

    #[test]
    fn test_normalize_keeps_accents() {
        let tokens = normalize("Ação é coração");
        assert_eq!(tokens, vec!["ação", "é", "coração"]);
    }

    #[test]
    fn test_normalize_empty_input() {
        assert!(normalize("").is_empty());
        assert!(normalize("!?.,;: 42").is_empty());
    }

    #[test]
    fn test_filter_preserves_order_and_duplicates() {
        let filter = LexicalFilter::passthrough();
        let tokens = filter.analyze("sol lua sol");
        assert_eq!(tokens, vec!["sol", "lua", "sol"]);
    }

    #[test]
    fn test_portuguese_stopwords_dropped() {
        let filter = LexicalFilter::portuguese();
        let tokens = filter.analyze("a casa de pedra");
        // "a" and "de" are stopwords; the rest is stemmed.
        assert_eq!(tokens.len(), 2);
        assert!(!tokens.contains(&"de".to_string()));
    }

    #[test]
    fn test_stopword_checked_before_stemming() {
        // "cas" is declared a stopword and the stemmer maps "casa" -> "cas".
        // Membership runs on the raw token, so "casa" survives while the
        // literal "cas" is dropped.
        let stopwords: HashSet<String> = ["cas"].iter().map(|s| s.to_string()).collect();
        let filter = LexicalFilter::new(stopwords, Box::new(TruncStemmer));

        let tokens = filter.analyze("casa cas");
        assert_eq!(tokens, vec!["cas"]);
    }
}
