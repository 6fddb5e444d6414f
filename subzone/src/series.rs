//! Séries annuelles typées (année → valeur)
//!
//! Les attributs `pop` et `net_supply` arrivent sous forme de dictionnaires
//! sérialisés dans un texte (`{2024: 120, 2025: -4}`). Ils sont décodés une
//! seule fois au chargement. Le décodage est total: un texte illisible donne
//! `None`, que l'appelant remplace par une série vide.
//!
//! Une année présente avec une valeur non numérique (`None`, `'n/a'`) est
//! conservée comme telle: elle ne se confond pas avec une année absente,
//! qui vaut `0`.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// Année de projection (ex: 2024)
pub type Year = u16;

/// Série annuelle ordonnée par année croissante.
///
/// `None` marque une année renseignée avec une valeur non numérique.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Series(BTreeMap<Year, Option<f64>>);

impl Series {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marque `year` comme renseignée sans valeur numérique
    pub fn with_non_numeric(mut self, year: Year) -> Self {
        self.0.insert(year, None);
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Valeur numérique pour une année, si présente
    pub fn get(&self, year: Year) -> Option<f64> {
        self.0.get(&year).copied().flatten()
    }

    /// Valeur lue pour une année.
    ///
    /// `Some(0.0)` si l'année est absente, `None` si elle est renseignée
    /// avec une valeur non numérique.
    pub fn value_at(&self, year: Year) -> Option<f64> {
        match self.0.get(&year) {
            Some(value) => *value,
            None => Some(0.0),
        }
    }

    /// Comme [`Series::value_at`], une valeur non numérique comptant pour `0`
    pub fn numeric_at(&self, year: Year) -> f64 {
        self.value_at(year).unwrap_or(0.0)
    }

    /// Toutes les valeurs numériques, toutes années confondues
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.values().filter_map(|value| *value)
    }

    /// Couples (année, valeur) triés par année croissante, y compris les
    /// années sans valeur numérique
    pub fn points(&self) -> impl Iterator<Item = (Year, Option<f64>)> + '_ {
        self.0.iter().map(|(&year, &value)| (year, value))
    }

    /// Décode un attribut de feature.
    ///
    /// - texte: dictionnaire littéral (voir [`Series::parse_literal`])
    /// - objet JSON: clés converties en années, valeurs non numériques
    ///   conservées comme marqueurs
    /// - absent ou `null`: série vide (pas une erreur)
    ///
    /// Retourne `None` si l'attribut existe mais n'est pas exploitable.
    pub fn decode(value: Option<&Value>) -> Option<Self> {
        match value {
            None | Some(Value::Null) => Some(Self::new()),
            Some(Value::String(text)) => Self::parse_literal(text),
            Some(Value::Object(map)) => Some(Series(
                map.iter()
                    .filter_map(|(key, value)| Some((parse_year(key)?, value.as_f64())))
                    .collect(),
            )),
            Some(_) => None,
        }
    }

    /// Parse un dictionnaire littéral `{année: valeur, ...}`.
    ///
    /// Les clés sont des entiers, éventuellement entre guillemets. Les valeurs
    /// non numériques (`None`, `True`, chaînes) sont gardées comme marqueurs.
    /// Toute autre erreur de syntaxe rend `None`.
    pub fn parse_literal(text: &str) -> Option<Self> {
        LiteralParser::new(text).parse()
    }
}

impl FromIterator<(Year, f64)> for Series {
    fn from_iter<I: IntoIterator<Item = (Year, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(year, value)| (year, Some(value))).collect())
    }
}

fn parse_year(key: &str) -> Option<Year> {
    key.trim().parse().ok()
}

/// Clé ou valeur lue dans le dictionnaire
enum Literal<'a> {
    Number(&'a str),
    Text(&'a str),
    /// `None`, `True`, `False`
    Keyword,
}

struct LiteralParser<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> LiteralParser<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    fn parse(mut self) -> Option<Series> {
        let mut series = BTreeMap::new();

        self.expect(b'{')?;
        loop {
            if self.eat(b'}') {
                break;
            }

            let key = self.literal()?;
            self.expect(b':')?;
            let value = self.literal()?;

            // Les doublons écrasent la valeur précédente
            match (key_to_year(&key), value) {
                (Some(year), Literal::Number(raw)) => {
                    series.insert(year, Some(raw.parse::<f64>().ok()?));
                }
                (Some(year), _) => {
                    series.insert(year, None);
                }
                (None, _) => {}
            }

            if self.eat(b',') {
                continue;
            }
            self.expect(b'}')?;
            break;
        }

        self.skip_whitespace();
        if self.pos != self.text.len() {
            return None;
        }

        Some(Series(series))
    }

    fn bytes(&self) -> &'a [u8] {
        self.text.as_bytes()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes().get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    /// Consomme `byte` s'il est le prochain caractère significatif
    fn eat(&mut self, byte: u8) -> bool {
        self.skip_whitespace();
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, byte: u8) -> Option<()> {
        self.eat(byte).then_some(())
    }

    fn literal(&mut self) -> Option<Literal<'a>> {
        self.skip_whitespace();
        match self.peek()? {
            quote @ (b'\'' | b'"') => self.quoted(quote),
            b'+' | b'-' | b'.' | b'0'..=b'9' => self.number(),
            b if b.is_ascii_alphabetic() => self.keyword(),
            _ => None,
        }
    }

    fn quoted(&mut self, quote: u8) -> Option<Literal<'a>> {
        self.pos += 1;
        let start = self.pos;
        let bytes = self.bytes();
        while self.pos < bytes.len() {
            match bytes[self.pos] {
                b'\\' => self.pos += 2,
                b if b == quote => {
                    let content = &self.text[start..self.pos];
                    self.pos += 1;
                    return Some(Literal::Text(content));
                }
                _ => self.pos += 1,
            }
        }
        None
    }

    fn number(&mut self) -> Option<Literal<'a>> {
        let start = self.pos;
        let bytes = self.bytes();
        if matches!(bytes[self.pos], b'+' | b'-') {
            self.pos += 1;
        }

        let mut digits = 0;
        let mut previous = 0u8;
        while let Some(b) = self.peek() {
            let accepted = match b {
                b'0'..=b'9' => {
                    digits += 1;
                    true
                }
                b'.' | b'e' | b'E' => true,
                b'+' | b'-' => matches!(previous, b'e' | b'E'),
                _ => false,
            };
            if !accepted {
                break;
            }
            previous = b;
            self.pos += 1;
        }

        if digits == 0 {
            return None;
        }
        // "+5" n'est pas accepté par f64::from_str
        let raw = self.text[start..self.pos].trim_start_matches('+');
        raw.parse::<f64>().ok()?;
        Some(Literal::Number(raw))
    }

    fn keyword(&mut self) -> Option<Literal<'a>> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|b| b.is_ascii_alphanumeric() || b == b'_')
        {
            self.pos += 1;
        }
        match &self.text[start..self.pos] {
            "None" | "True" | "False" => Some(Literal::Keyword),
            _ => None,
        }
    }
}

fn key_to_year(key: &Literal<'_>) -> Option<Year> {
    match key {
        Literal::Number(raw) | Literal::Text(raw) => parse_year(raw),
        Literal::Keyword => None,
    }
}
