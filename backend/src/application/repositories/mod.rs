mod vector_repository;

pub use vector_repository::VectorRepository;
