pub mod dataset_loader;
pub mod measurement_reader;
pub mod station_reader;

pub use dataset_loader::DatasetLoader;
pub use measurement_reader::MeasurementReader;
pub use station_reader::StationReader;
