//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods.
//! Single-statement methods accept any [`sqlx::PgExecutor`] so handlers can
//! pass either `&PgPool` or a transaction. Methods that run several
//! statements (a write plus its relationship-consistency steps) take
//! `&mut PgConnection` and expect the caller to own the transaction.

pub mod category_repo;
pub mod council_repo;
pub mod federal_state_repo;
pub mod problem_repo;
pub mod project_repo;
pub mod proposal_repo;
pub mod used_problem_repo;
pub mod user_repo;

pub use category_repo::CategoryRepo;
pub use council_repo::CouncilRepo;
pub use federal_state_repo::FederalStateRepo;
pub use problem_repo::ProblemRepo;
pub use project_repo::ProjectRepo;
pub use proposal_repo::ProposalRepo;
pub use used_problem_repo::UsedProblemRepo;
pub use user_repo::UserRepo;
