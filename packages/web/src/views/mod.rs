mod auth;
pub use auth::{LoginOwner, LoginWalker, RegisterOwner, RegisterWalker};

mod layout;
pub use layout::{NotFound, OwnerLayout, WalkerLayout};

mod owner;
pub use owner::{
    EditPet, NearbyWalkers, NewPet, OwnerHome, OwnerPets, OwnerWalkDetail, OwnerWalks, PetPhoto,
    RequestWalk, RequestWalkWith, WalkerDetail,
};

mod walker;
pub use walker::{WalkerHome, WalkerReviews, WalkerWalkDetail, WalkerWalks};

mod shared;
