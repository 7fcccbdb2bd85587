mod concurrency;
mod scenarios;
mod seeding;
