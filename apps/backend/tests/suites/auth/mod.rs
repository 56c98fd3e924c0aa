mod middleware;
mod ownership;
