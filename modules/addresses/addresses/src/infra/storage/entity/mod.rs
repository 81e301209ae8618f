pub mod address;
pub mod address_owner;
pub mod city;
pub mod city_translation;
pub mod country;
pub mod user;
