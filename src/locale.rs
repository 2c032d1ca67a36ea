use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    analysis::correlation::{CorrelationResult, Direction, Strength},
    error::SurveyorError,
};

/// Language of every rendered string. Computation never depends on it.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Language {
    #[default]
    English,
    Indonesian,
}

impl FromStr for Language {
    type Err = SurveyorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Language::English),
            "id" | "indonesian" | "bahasa" => Ok(Language::Indonesian),
            _ => Err(SurveyorError::ParseLanguage(s.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Language::English => "EN",
            Language::Indonesian => "ID",
        };
        write!(f, "{}", s)
    }
}

impl TryFrom<String> for Language {
    type Error = SurveyorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Language> for String {
    fn from(language: Language) -> Self {
        language.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextKey {
    Title,
    Subtitle,
    Preview,
    DatasetSize,
    DescriptiveStats,
    FrequencyTables,
    Visualizations,
    Association,
    CorrelationOutput,
    Interpretation,
    VariableX,
    VariableY,
    Column,
    Count,
    Mean,
    Median,
    Std,
    Min,
    Max,
    Composite,
    NoNumeric,
    Method,
    CorrelationCoefficient,
    PValue,
    Direction,
    Strength,
    Positive,
    Negative,
    VeryWeak,
    Weak,
    Moderate,
    Strong,
    Undefined,
    Value,
    Frequency,
    Percentage,
    Histogram,
    Boxplot,
    Whiskers,
    Outliers,
}

impl Language {
    /// Looks up the display string for `key` in this language.
    pub fn text(self, key: TextKey) -> &'static str {
        let (en, id) = match key {
            TextKey::Title => ("Survey Data Analysis", "Analisis Data Survei"),
            TextKey::Subtitle => (
                "Comprehensive statistical insights for your survey dataset.",
                "Analisis statistik yang komprehensif untuk data survei Anda.",
            ),
            TextKey::Preview => ("Preview of Dataset", "Pratinjau Dataset"),
            TextKey::DatasetSize => ("Dataset size", "Ukuran dataset"),
            TextKey::DescriptiveStats => (
                "Descriptive Statistics (Each Item + Composite Scores)",
                "Statistik Deskriptif (Setiap Item + Skor Komposit)",
            ),
            TextKey::FrequencyTables => (
                "Frequency & Percentage Tables",
                "Tabel Frekuensi & Persentase",
            ),
            TextKey::Visualizations => (
                "Visualizations (Histogram & Boxplot)",
                "Visualisasi (Histogram & Boxplot)",
            ),
            TextKey::Association => (
                "Association Analysis (Correlation)",
                "Analisis Asosiasi (Korelasi)",
            ),
            TextKey::CorrelationOutput => ("Correlation Output", "Hasil Korelasi"),
            TextKey::Interpretation => ("Interpretation", "Interpretasi"),
            TextKey::VariableX => ("Variable X", "Variabel X"),
            TextKey::VariableY => ("Variable Y", "Variabel Y"),
            TextKey::Column => ("Column", "Kolom"),
            TextKey::Count => ("Count", "Jumlah"),
            TextKey::Mean => ("Mean", "Rata-rata"),
            TextKey::Median => ("Median", "Median"),
            TextKey::Std => ("Standard Deviation", "Simpangan Baku"),
            TextKey::Min => ("Minimum", "Minimum"),
            TextKey::Max => ("Maximum", "Maksimum"),
            TextKey::Composite => ("Composite Score", "Skor Komposit"),
            TextKey::NoNumeric => (
                "No numeric variables found in the dataset.",
                "Tidak ditemukan variabel numerik.",
            ),
            TextKey::Method => ("Method", "Metode"),
            TextKey::CorrelationCoefficient => {
                ("Correlation Coefficient (r)", "Koefisien Korelasi (r)")
            }
            TextKey::PValue => ("p-value", "p-value"),
            TextKey::Direction => ("Direction", "Arah"),
            TextKey::Strength => ("Strength", "Kekuatan"),
            TextKey::Positive => ("Positive", "Positif"),
            TextKey::Negative => ("Negative", "Negatif"),
            TextKey::VeryWeak => ("Very Weak", "Sangat Lemah"),
            TextKey::Weak => ("Weak", "Lemah"),
            TextKey::Moderate => ("Moderate", "Sedang"),
            TextKey::Strong => ("Strong", "Kuat"),
            TextKey::Undefined => ("Undefined", "Tidak terdefinisi"),
            TextKey::Value => ("Value", "Nilai"),
            TextKey::Frequency => ("Frequency", "Frekuensi"),
            TextKey::Percentage => ("Percentage (%)", "Persentase (%)"),
            TextKey::Histogram => ("Histogram", "Histogram"),
            TextKey::Boxplot => ("Boxplot", "Boxplot"),
            TextKey::Whiskers => ("Whiskers", "Batas whisker"),
            TextKey::Outliers => ("Outliers", "Pencilan"),
        };
        match self {
            Language::English => en,
            Language::Indonesian => id,
        }
    }

    pub fn direction(self, direction: Direction) -> &'static str {
        match direction {
            Direction::Positive => self.text(TextKey::Positive),
            Direction::Negative => self.text(TextKey::Negative),
        }
    }

    pub fn strength(self, strength: Strength) -> &'static str {
        match strength {
            Strength::VeryWeak => self.text(TextKey::VeryWeak),
            Strength::Weak => self.text(TextKey::Weak),
            Strength::Moderate => self.text(TextKey::Moderate),
            Strength::Strong => self.text(TextKey::Strong),
        }
    }

    /// Notice shown when a composite score name is already taken by an input column.
    pub fn composite_name_taken(self, column: &str) -> String {
        match self {
            Language::English => format!(
                "The dataset already has a column named `{column}`. Set `composite-x` and `composite-y` in the config to use other names."
            ),
            Language::Indonesian => format!(
                "Dataset sudah memiliki kolom bernama `{column}`. Atur `composite-x` dan `composite-y` di konfigurasi untuk memakai nama lain."
            ),
        }
    }

    /**
    The interpretation sentence for a correlation result.

    Strength and direction are lower-cased, `r` is shown with 3 decimals and
    the p-value with 4. An undefined result gets a sentence saying so instead
    of a classification.
     */
    pub fn interpretation(self, result: &CorrelationResult) -> String {
        let method = result.method;
        let Ok(classification) = result.classify() else {
            return match self {
                Language::English => format!(
                    "The {} correlation is undefined for this data (fewer than two paired observations or zero variance).",
                    method
                ),
                Language::Indonesian => format!(
                    "Korelasi {} tidak dapat dihitung untuk data ini (kurang dari dua pasangan observasi atau variansi nol).",
                    method
                ),
            };
        };

        let strength = self.strength(classification.strength).to_lowercase();
        let direction = self.direction(classification.direction).to_lowercase();
        let (r, p) = (result.coefficient, result.p_value);
        match self {
            Language::English => format!(
                "The {method} correlation shows a {strength} {direction} relationship between Variable X and Variable Y (r = {r:.3}, p-value = {p:.4})."
            ),
            Language::Indonesian => format!(
                "Korelasi {method} menunjukkan hubungan {direction} dengan kekuatan {strength} antara Variabel X dan Variabel Y (r = {r:.3}, p-value = {p:.4})."
            ),
        }
    }
}
