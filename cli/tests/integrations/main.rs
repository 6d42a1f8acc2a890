mod interactive;
mod run;
mod server;
mod show;
