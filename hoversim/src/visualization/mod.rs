pub mod hoversim_vis2d;
