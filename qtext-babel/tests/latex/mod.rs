mod export;
mod images;
