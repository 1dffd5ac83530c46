mod create_new;
mod crud;
mod eligible;
mod mine;
mod photos;

pub use create_new::create_new_project;
pub use crud::*;
pub use eligible::eligible_projects;
pub use mine::my_projects;
pub use photos::project_photos;

const ENTITY_NAME: &str = "project";
const COLLECTION_PATH: &str = "/api/projects";
