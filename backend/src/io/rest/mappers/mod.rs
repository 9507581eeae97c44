pub mod profile_mapper;

pub use profile_mapper::ProfileMapper;
