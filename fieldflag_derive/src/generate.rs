mod field;
mod record;
