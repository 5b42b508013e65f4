mod kind_color;
mod cell_ops;
