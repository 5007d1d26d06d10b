use super::{Address, Company, NewUser, User};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeMap;

lazy_static! {
	static ref EMAIL: Regex = Regex::new(r"\S+@\S+\.\S+").expect("email pattern");
	static ref PHONE: Regex = Regex::new(r"^[0-9]{10}$").expect("phone pattern");
	static ref WEBSITE: Regex =
		Regex::new(r"^(https?://)?([0-9a-z.-]+)\.([a-z.]{2,6})([/0-9A-Za-z_ .-]*)*/?$").expect("website pattern");
}

/// The editable fields of a user, as typed into the create or edit form.
/// Optional fields are empty when not provided.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UserForm {
	pub name: String,
	pub email: String,
	pub phone: String,
	pub street: String,
	pub city: String,
	pub company: String,
	pub website: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
	Name,
	Email,
	Phone,
	Address,
	Company,
	Website,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldErrors(BTreeMap<Field, &'static str>);

impl FieldErrors {
	fn insert(&mut self, field: Field, message: &'static str) {
		self.0.insert(field, message);
	}

	pub fn get(&self, field: Field) -> Option<&'static str> {
		self.0.get(&field).copied()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
		self.0.iter().map(|(field, message)| (*field, *message))
	}

	fn into_result(self) -> Result<(), Self> {
		match self.is_empty() {
			true => Ok(()),
			false => Err(self),
		}
	}
}

impl std::fmt::Display for FieldErrors {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let mut first = true;
		for (field, message) in self.iter() {
			if !first {
				write!(f, "; ")?;
			}
			write!(f, "{field:?}: {message}")?;
			first = false;
		}
		Ok(())
	}
}

pub fn derive_username(name: &str) -> String {
	if name.is_empty() {
		return String::new();
	}
	let compact = name.chars().filter(|c| !c.is_whitespace()).collect::<String>();
	format!("USER-{}", compact.to_lowercase())
}

impl UserForm {
	pub fn from_user(user: &User) -> Self {
		Self {
			name: user.name.clone(),
			email: user.email.clone(),
			phone: user.phone.clone(),
			street: user.address.street.clone(),
			city: user.address.city.clone(),
			company: user.company_name().unwrap_or_default().to_owned(),
			website: user.website.clone(),
		}
	}

	/// Usernames can't be edited, they always follow the current name.
	pub fn username(&self) -> String {
		derive_username(&self.name)
	}

	fn address(&self) -> Address {
		Address {
			street: self.street.clone(),
			city: self.city.clone(),
			extra: Default::default(),
		}
	}

	fn company(&self) -> Option<Company> {
		match self.company.is_empty() {
			true => None,
			false => Some(Company::named(self.company.clone())),
		}
	}

	/// The body of a create request, with the username derived from the name as it is right now.
	pub fn to_new_user(&self) -> NewUser {
		NewUser {
			name: self.name.clone(),
			username: self.username(),
			email: self.email.clone(),
			phone: self.phone.clone(),
			address: self.address(),
			company: self.company(),
			website: self.website.clone(),
			extra: Default::default(),
		}
	}

	/// Writes the form over an existing record.
	/// The id, username, and any fields the form doesn't know about are kept.
	pub fn apply_to(&self, user: &mut User) {
		user.name = self.name.clone();
		user.email = self.email.clone();
		user.phone = self.phone.clone();
		user.address = self.address();
		user.company = self.company();
		user.website = self.website.clone();
	}
}

fn check_common(form: &UserForm, errors: &mut FieldErrors) {
	if form.name.chars().count() < 3 {
		errors.insert(Field::Name, "Name is required and must be at least 3 characters.");
	}
	if !EMAIL.is_match(&form.email) {
		errors.insert(Field::Email, "Email is required and must be a valid email address.");
	}
	if form.street.is_empty() || form.city.is_empty() {
		errors.insert(Field::Address, "Both street and city are required.");
	}
}

pub fn validate_create(form: &UserForm) -> Result<(), FieldErrors> {
	let mut errors = FieldErrors::default();
	check_common(form, &mut errors);
	if !PHONE.is_match(&form.phone) {
		errors.insert(Field::Phone, "Phone number is required and must be 10 digits.");
	}
	if !form.company.is_empty() && form.company.chars().count() < 3 {
		errors.insert(Field::Company, "Company name must be at least 3 characters.");
	}
	if !form.website.is_empty() && !WEBSITE.is_match(&form.website) {
		errors.insert(Field::Website, "Website must be a valid URL.");
	}
	errors.into_result()
}

// Unlike create, any non-empty phone number is accepted here, and company/website aren't checked.
pub fn validate_update(form: &UserForm) -> Result<(), FieldErrors> {
	let mut errors = FieldErrors::default();
	check_common(form, &mut errors);
	if form.phone.is_empty() {
		errors.insert(Field::Phone, "Phone number is required.");
	}
	errors.into_result()
}
