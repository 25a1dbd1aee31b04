mod tables;

pub use self::tables::{
    end_table as print_end_table, presets as print_presets, standings as print_standings,
    statistics as print_statistics,
};
