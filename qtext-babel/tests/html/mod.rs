mod export;
mod images;
mod math;
mod table;
