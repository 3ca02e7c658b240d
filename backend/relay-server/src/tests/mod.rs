mod health;
mod logger;
