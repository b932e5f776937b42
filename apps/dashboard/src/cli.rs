use clap::{Args, Parser, Subcommand};

use crate::commands::calculator::PricingForm;

#[derive(Parser, Debug)]
#[command(name = "tumdum", version, about = "TumDum vs Zomato pricing comparison")]
pub struct Cli {
    /// Print machine-readable JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Compare both platforms for one dish
    Compare {
        #[command(flatten)]
        pricing: PricingArgs,

        /// Order volumes for the projection table, comma separated
        #[arg(long, value_delimiter = ',')]
        volumes: Vec<u32>,
    },

    /// Compare, then save the analysis
    Save {
        #[command(flatten)]
        pricing: PricingArgs,

        /// Restaurant name
        #[arg(long)]
        restaurant: String,

        /// Dish name
        #[arg(long)]
        dish: String,
    },

    /// List saved analyses, newest first
    Records {
        /// Case-insensitive part of the restaurant name
        #[arg(short, long, default_value = "")]
        filter: String,
    },

    /// Show one saved analysis
    Show {
        /// Record id
        id: String,
    },

    /// Delete a saved analysis
    Delete {
        /// Record id
        id: String,
    },

    /// Show the effective configuration and database status
    Config,
}

/// Pricing inputs; omitted values count as not entered.
#[derive(Args, Debug, Clone, Default)]
pub struct PricingArgs {
    /// Menu price (informational)
    #[arg(long, default_value = "")]
    pub menu_price: String,

    /// Price listed on Zomato before discount
    #[arg(long, default_value = "")]
    pub listed_price: String,

    /// Zomato commission percent (0-100)
    #[arg(long, default_value = "")]
    pub commission: String,

    /// Absolute discount off the listed price
    #[arg(long, default_value = "")]
    pub discount: String,

    /// Delivery distance in km
    #[arg(long, default_value = "")]
    pub distance: String,

    /// Fixed Zomato delivery fee instead of the per-km rate
    #[arg(long, default_value = "")]
    pub delivery_fee: String,

    /// Customer has Zomato Gold
    #[arg(long)]
    pub gold: bool,

    /// Profit margin percent over Zomato (1-30)
    #[arg(long)]
    pub margin: Option<u8>,
}

impl From<&PricingArgs> for PricingForm {
    fn from(args: &PricingArgs) -> Self {
        PricingForm {
            menu_price: args.menu_price.clone(),
            listed_price: args.listed_price.clone(),
            commission_percent: args.commission.clone(),
            discount: args.discount.clone(),
            distance_km: args.distance.clone(),
            delivery_fee_override: args.delivery_fee.clone(),
            gold_enabled: args.gold,
            profit_margin_percent: args.margin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_parses_pricing_and_volumes() {
        let cli = Cli::try_parse_from([
            "tumdum",
            "compare",
            "--menu-price",
            "150",
            "--listed-price",
            "200",
            "--commission",
            "20",
            "--distance",
            "5",
            "--gold",
            "--volumes",
            "1,10,100",
        ])
        .unwrap();

        match cli.command {
            Commands::Compare { pricing, volumes } => {
                assert_eq!(volumes, vec![1, 10, 100]);
                let form = PricingForm::from(&pricing);
                assert_eq!(form.listed_price, "200");
                assert_eq!(form.discount, "");
                assert!(form.gold_enabled);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_save_requires_names() {
        assert!(Cli::try_parse_from(["tumdum", "save", "--listed-price", "200"]).is_err());
    }

    #[test]
    fn test_json_flag_is_global() {
        let cli = Cli::try_parse_from(["tumdum", "records", "--json", "-f", "zom"]).unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Records { filter } => assert_eq!(filter, "zom"),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
