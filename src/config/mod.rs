pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;

#[cfg(feature = "cli")]
mod cli {
    use crate::core::ConfigProvider;
    use crate::core::export::DEFAULT_TITLE;
    use crate::core::sniffer::{MAX_SAMPLE_BYTES, MIN_SAMPLE_BYTES};
    use crate::domain::vocabulary::Vocabulary;
    use crate::utils::error::Result;
    use crate::utils::validation::{
        validate_extension, validate_non_empty_string, validate_path, validate_range, Validate,
    };
    use clap::Parser;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize, Parser)]
    #[command(name = "price-scout")]
    #[command(about = "Search price lists by product name and price per kilogram")]
    pub struct CliConfig {
        /// Directory scanned for price-list files
        #[arg(long, default_value = ".")]
        pub prices_dir: String,

        /// Case-insensitive token a file name must contain
        #[arg(long, default_value = "price")]
        pub marker: String,

        /// File extension of price lists, without the dot
        #[arg(long, default_value = "csv")]
        pub extension: String,

        /// HTML report written when the session ends
        #[arg(long, default_value = "output.html")]
        pub output: String,

        /// Bytes read from each file to detect its delimiter
        #[arg(long, default_value = "1024")]
        pub sample_bytes: usize,

        #[arg(long, default_value = DEFAULT_TITLE)]
        pub title: String,

        /// TOML configuration file; replaces the flags above when given
        #[arg(short, long)]
        pub config: Option<String>,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Emit logs as JSON")]
        pub log_json: bool,

        #[arg(skip)]
        #[serde(default)]
        pub vocabulary: Vocabulary,
    }

    impl ConfigProvider for CliConfig {
        fn prices_dir(&self) -> &str {
            &self.prices_dir
        }

        fn file_marker(&self) -> &str {
            &self.marker
        }

        fn file_extension(&self) -> &str {
            &self.extension
        }

        fn sample_bytes(&self) -> usize {
            self.sample_bytes
        }

        fn output_path(&self) -> &str {
            &self.output
        }

        fn export_title(&self) -> &str {
            &self.title
        }

        fn vocabulary(&self) -> &Vocabulary {
            &self.vocabulary
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validate_path("prices_dir", &self.prices_dir)?;
            validate_path("output", &self.output)?;
            validate_non_empty_string("marker", &self.marker)?;
            validate_extension("extension", &self.extension)?;
            validate_range(
                "sample_bytes",
                self.sample_bytes,
                MIN_SAMPLE_BYTES,
                MAX_SAMPLE_BYTES,
            )?;
            Ok(())
        }
    }

}
