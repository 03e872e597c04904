pub mod api;
pub mod arrivals;
pub mod config;
pub mod error;
pub mod fetch;
pub mod parser;
pub mod series;
pub mod weather;

pub mod gtfs_rt {
    include!(concat!(env!("OUT_DIR"), "/transit_realtime.rs"));
}
