pub mod classify_query;
pub mod solve_simple_problem;

pub use classify_query::ClassifyQuery;
pub use solve_simple_problem::SolveSimpleProblem;
