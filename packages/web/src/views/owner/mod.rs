//! Owner section: pets, walks, walkers.

mod home;
mod nearby;
mod pet_form;
mod pet_photo;
mod pets;
mod request_walk;
mod walk_detail;
mod walker_profile;
mod walks;

pub use home::OwnerHome;
pub use nearby::NearbyWalkers;
pub use pet_form::{EditPet, NewPet};
pub use pet_photo::PetPhoto;
pub use pets::OwnerPets;
pub use request_walk::{RequestWalk, RequestWalkWith};
pub use walk_detail::OwnerWalkDetail;
pub use walker_profile::WalkerDetail;
pub use walks::OwnerWalks;
