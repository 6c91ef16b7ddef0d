mod helpers;
mod routes;
