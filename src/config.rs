use clap::Parser;

// CLI argument structure, every flag can also come from the environment
#[derive(Parser, Debug, Clone)]
#[command(name = "skater-count")]
#[command(about = "Cached, rate limited skater count endpoint")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    // Supabase project URL
    // Example: "https://abcd.supabase.co"
    #[arg(long, env = "SUPABASE_URL")]
    pub supabase_url: String,

    // Service role key used for the count query
    #[arg(long, env = "SUPABASE_SERVICE_ROLE_KEY", hide_env_values = true)]
    pub supabase_key: String,

    // Table whose rows are counted
    #[arg(short, long, env = "COUNT_COLLECTION", default_value = "profiles")]
    pub collection: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_only_the_data_source_is_given() {
        let args = Args::try_parse_from([
            "skater-count",
            "--supabase-url",
            "https://example.supabase.co",
            "--supabase-key",
            "secret",
        ])
        .unwrap();

        assert_eq!(args.collection, "profiles");
        assert_eq!(args.supabase_url, "https://example.supabase.co");
    }

    #[test]
    fn collection_and_port_can_be_overridden() {
        let args = Args::try_parse_from([
            "skater-count",
            "--supabase-url",
            "http://localhost:54321",
            "--supabase-key",
            "secret",
            "-p",
            "9000",
            "-c",
            "skaters",
        ])
        .unwrap();

        assert_eq!(args.port, 9000);
        assert_eq!(args.collection, "skaters");
    }
}
