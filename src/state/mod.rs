pub(crate) mod studio;
